//! Lint driver: parses a file and dispatches AST nodes to rules.

use swc_ecma_ast::Class;
use swc_ecma_visit::{Visit, VisitWith};

use crate::context::RuleContext;
use crate::diagnostic::Finding;
use crate::parse::{ParseDiagnostic, parse_source};
use crate::rule::{Rule, Target};
use crate::rules;
use crate::settings::Settings;

pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
    settings: Settings,
}

impl Linter {
    /// Linter with the default rule set
    pub fn new(settings: Settings) -> Self {
        Self::with_rules(rules::default_rules(), settings)
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>, settings: Settings) -> Self {
        Self { rules, settings }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Parse `source` and run every registered rule over it
    pub fn lint_source(&self, path: &str, source: &str) -> Result<Vec<Finding>, ParseDiagnostic> {
        let parsed = parse_source(path, source)?;

        let mut ctx = RuleContext::new(path, &parsed.source_map, &self.settings);
        let mut dispatcher = Dispatcher {
            rules: &self.rules,
            ctx: &mut ctx,
        };
        parsed.module.visit_with(&mut dispatcher);

        let findings = ctx.into_findings();
        tracing::debug!("{}: {} finding(s)", path, findings.len());
        Ok(findings)
    }
}

/// Routes AST nodes to the rules subscribed to them. Class declarations
/// and class expressions both arrive through `visit_class`.
struct Dispatcher<'a, 'b> {
    rules: &'a [Box<dyn Rule>],
    ctx: &'a mut RuleContext<'b>,
}

impl Visit for Dispatcher<'_, '_> {
    fn visit_class(&mut self, node: &Class) {
        for rule in self.rules {
            if rule.targets().contains(&Target::Class) {
                rule.check_class(node, self.ctx);
            }
        }
        // classes can nest inside class bodies
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_set_is_registered() {
        let linter = Linter::new(Settings::default());
        let names: Vec<_> = linter.rules().iter().map(|r| r.meta().name).collect();
        assert_eq!(names, vec!["no-classfield-shadowing"]);
    }

    #[test]
    fn empty_rule_set_reports_nothing() {
        let linter = Linter::with_rules(Vec::new(), Settings::default());
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = {foo: {}}\n}\n";
        assert!(linter.lint_source("element.ts", source).unwrap().is_empty());
    }

    #[test]
    fn class_expressions_are_visited() {
        let linter = Linter::new(Settings::default());
        let source =
            "const make = () => class extends LitElement {\n  foo;\n  static properties = {foo: {}}\n};\n";
        let findings = linter.lint_source("element.ts", source).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!((findings[0].line, findings[0].column), (3, 24));
    }

    #[test]
    fn classes_nested_in_methods_are_visited() {
        let linter = Linter::new(Settings::default());
        let source = "class Outer {\n  make() {\n    return class extends LitElement {\n      foo;\n      static properties = {foo: {}}\n    };\n  }\n}\n";
        let findings = linter.lint_source("element.ts", source).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!((findings[0].line, findings[0].column), (5, 28));
    }

    #[test]
    fn every_class_in_a_module_is_checked() {
        let linter = Linter::new(Settings::default());
        let source = "class A extends LitElement {\n  foo;\n  static properties = {foo: {}}\n}\nclass B extends LitElement {\n  bar;\n  static properties = {bar: {}}\n}\n";
        let findings = linter.lint_source("element.ts", source).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].data.get("prop").map(String::as_str), Some("foo"));
        assert_eq!(findings[1].data.get("prop").map(String::as_str), Some("bar"));
    }

    #[test]
    fn parse_failures_surface_as_errors() {
        let linter = Linter::new(Settings::default());
        let err = linter.lint_source("broken.ts", "const s = `oops;\n").unwrap_err();
        assert!(err.message.contains("Unterminated template"));
    }
}
