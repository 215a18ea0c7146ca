//! Terminal source-frame rendering for findings and parse failures.
//!
//! ```text
//! Lint Error
//! ❌ no-classfield-shadowing
//!
//! ┌─ element.ts:2:24
//! │
//!   2 │   static properties = {foo: {}}
//!     │                        ^^^ class field "foo" shadows ...
//! │
//! = help: Remove the class field and let the reactive property manage the value.
//! │
//! └─
//! ```

use crate::diagnostic::{Finding, Severity};
use crate::parse::ParseDiagnostic;

/// Render a rule finding as a colored source frame
pub fn render_finding(source: &str, finding: &Finding) -> String {
    let (icon, label, color) = match finding.severity {
        Severity::Error => ("❌", "Lint Error", "\x1b[31m"),
        Severity::Warning => ("⚠️", "Lint Warning", "\x1b[33m"),
    };
    render_frame(
        source,
        &finding.path,
        label,
        icon,
        finding.rule,
        color,
        finding.line,
        finding.column,
        finding.underline,
        &finding.message,
        &finding.help,
    )
}

/// Render a parse failure as a colored source frame
pub fn render_parse_diagnostic(source: &str, diagnostic: &ParseDiagnostic) -> String {
    render_frame(
        source,
        &diagnostic.path,
        "Lint Error",
        "❌",
        "Parse Error",
        "\x1b[31m",
        diagnostic.line,
        diagnostic.column,
        diagnostic.underline,
        &diagnostic.message,
        &diagnostic.hint,
    )
}

fn render_frame(
    source: &str,
    path: &str,
    label: &str,
    icon: &str,
    kind: &str,
    color: &str,
    line_num: usize,
    col_num: usize,
    underline_length: usize,
    message: &str,
    help: &str,
) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let source_line = if line_num > 0 && line_num <= lines.len() {
        lines[line_num - 1]
    } else {
        ""
    };

    let underline_length = underline_length.max(1);

    let use_color = use_color_output();
    let icon = colorize(icon, color, use_color);
    let label = colorize(label, color, use_color);
    let kind = colorize(kind, color, use_color);

    let mut out = format!(
        "\n{}\n\
        {} {}\n\
        \n\
        ┌─ {}:{}:{}\n\
        │\n\
        {:>3} │ {}\n\
        {:>3} │ {}{} {}\n\
        │\n",
        label,
        icon,
        kind,
        path,
        line_num,
        col_num,
        line_num,
        source_line,
        "",
        " ".repeat(col_num.saturating_sub(1)),
        "^".repeat(underline_length),
        message,
    );

    if !help.trim().is_empty() {
        out.push_str(&format!("= help: {}\n", help));
    }
    out.push_str("│\n└─\n");
    out
}

fn use_color_output() -> bool {
    if cfg!(test) {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() || std::env::var("LITLINT_NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    true
}

fn colorize(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    format!("{color}{text}\x1b[0m")
}
