//! Finding types produced by lint rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use swc_common::{SourceMap, Span};

/// How severe a reported finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem reported by a rule, anchored to a source location
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Rule that produced this finding (e.g. "no-classfield-shadowing")
    pub rule: &'static str,
    /// Which of the rule's message templates was used
    pub message_id: &'static str,
    /// Resolved message with placeholders filled in
    pub message: String,
    /// Longer hint shown under the source frame
    pub help: String,
    /// Placeholder values used to resolve the message
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    pub severity: Severity,
    pub path: String,
    /// 1-based line of the anchor span
    pub line: usize,
    /// 1-based column of the anchor span
    pub column: usize,
    /// Width of the anchor span, in characters
    pub underline: usize,
}

/// Resolve a span into 1-based line/column plus the span width
pub(crate) fn extract_span_info(cm: &SourceMap, span: Span) -> (usize, usize, usize) {
    let loc_start = cm.lookup_char_pos(span.lo);
    let loc_end = cm.lookup_char_pos(span.hi);
    let line_num = loc_start.line;
    let col_num = loc_start.col.0 + 1;

    // Calculate span width
    let underline_length = if loc_start.line == loc_end.line {
        (loc_end.col.0.saturating_sub(loc_start.col.0)).max(1)
    } else {
        10 // Multi-line span
    };

    (line_num, col_num, underline_length)
}
