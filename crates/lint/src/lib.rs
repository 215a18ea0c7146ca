//! litlint core
//!
//! Parses TypeScript/JavaScript sources with swc and runs lint rules
//! over them. Rules subscribe to AST node kinds through [`rule::Target`]
//! and report findings anchored to source spans; [`render`] turns those
//! findings into terminal source frames.

pub mod context;
pub mod diagnostic;
pub mod linter;
pub mod parse;
pub mod render;
pub mod rule;
pub mod rules;
pub mod settings;

pub use context::RuleContext;
pub use diagnostic::{Finding, Severity};
pub use linter::Linter;
pub use parse::{ParseDiagnostic, Parsed, parse_source, syntax_for_path};
pub use render::{render_finding, render_parse_diagnostic};
pub use rule::{Message, Rule, RuleMeta, Target};
pub use settings::{SETTINGS_FILE, Settings};
