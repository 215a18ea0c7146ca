//! The rule trait and its metadata types.
//!
//! A rule declares which AST node kinds it wants to see, a table of
//! message templates keyed by id, and a default severity. The linter
//! dispatches matching nodes to every registered rule.

use swc_ecma_ast::Class;

use crate::context::RuleContext;
use crate::diagnostic::Severity;

/// AST node kinds a rule can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Class,
}

/// One message template, addressed by id from `RuleContext::report`
#[derive(Debug, Clone, Copy)]
pub struct Message {
    pub id: &'static str,
    /// Template with `{placeholder}` markers filled from report data
    pub template: &'static str,
}

/// Static metadata describing a rule
#[derive(Debug)]
pub struct RuleMeta {
    /// Kebab-case rule name (e.g. "no-classfield-shadowing")
    pub name: &'static str,
    /// One-line description shown in rule listings
    pub description: &'static str,
    pub default_severity: Severity,
    /// Longer hint rendered under each finding
    pub help: &'static str,
    pub messages: &'static [Message],
}

/// A lint rule
///
/// Rules implement a check method per target kind. The default bodies
/// do nothing, so a rule only overrides the kinds it declared.
pub trait Rule {
    fn meta(&self) -> &'static RuleMeta;

    fn targets(&self) -> &'static [Target];

    fn check_class(&self, _class: &Class, _ctx: &mut RuleContext) {}
}
