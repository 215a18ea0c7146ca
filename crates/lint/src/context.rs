//! Per-file state handed to rules while they run.

use std::collections::BTreeMap;

use swc_common::{SourceMap, Span};

use crate::diagnostic::{Finding, extract_span_info};
use crate::rule::RuleMeta;
use crate::settings::Settings;

/// Collects findings for one file and resolves message templates
pub struct RuleContext<'a> {
    path: &'a str,
    source_map: &'a SourceMap,
    settings: &'a Settings,
    findings: Vec<Finding>,
}

impl<'a> RuleContext<'a> {
    pub fn new(path: &'a str, source_map: &'a SourceMap, settings: &'a Settings) -> Self {
        Self {
            path,
            source_map,
            settings,
            findings: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        self.path
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Record a finding anchored at `span`, resolving the rule's message
    /// template for `message_id` with the `{placeholder}` values in `data`.
    ///
    /// An id missing from the rule's message table is a rule bug; the
    /// report is dropped with a warning rather than panicking mid-lint.
    pub fn report(
        &mut self,
        meta: &'static RuleMeta,
        message_id: &str,
        span: Span,
        data: &[(&str, &str)],
    ) {
        let Some(message) = meta.messages.iter().find(|m| m.id == message_id) else {
            tracing::warn!(
                "rule {} reported unknown message id {:?}",
                meta.name,
                message_id
            );
            return;
        };

        let (line, column, underline) = extract_span_info(self.source_map, span);

        self.findings.push(Finding {
            rule: meta.name,
            message_id: message.id,
            message: interpolate(message.template, data),
            help: meta.help.to_string(),
            data: data
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
            severity: meta.default_severity,
            path: self.path.to_string(),
            line,
            column,
            underline,
        });
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

fn interpolate(template: &str, data: &[(&str, &str)]) -> String {
    let mut message = template.to_string();
    for (key, value) in data {
        message = message.replace(&format!("{{{}}}", key), value);
    }
    message
}
