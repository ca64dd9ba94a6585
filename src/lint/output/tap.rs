//! TAP version 13 output formatter.
//!
//! One test point per page. Failing pages carry a YAML diagnostic block: the
//! first diagnostic sits at the top level and any further ones are nested
//! under `messages`.

use super::LintFormatter;
use crate::lint::{Diagnostic, PageResult, Severity};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Formats lint output as TAP.
#[derive(Debug, Default, Clone, Copy)]
pub struct TapFormatter;

#[derive(Serialize)]
struct TapDiagnostic<'a> {
    message: &'a str,
    severity: &'static str,
    data: TapData<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<TapDiagnostic<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TapData<'a> {
    actual: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<Value>,
    rule_id: &'a str,
}

impl<'a> TapDiagnostic<'a> {
    fn from_message(message: &'a Diagnostic) -> Self {
        Self {
            message: &message.message,
            severity: match message.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            },
            data: TapData {
                actual: &message.actual,
                expected: message.threshold(),
                rule_id: &message.rule_id,
            },
            messages: Vec::new(),
        }
    }

    /// Collapse a page's diagnostics into one block.
    fn collapse(messages: &'a [Diagnostic]) -> Option<Self> {
        let (first, rest) = messages.split_first()?;
        let mut block = Self::from_message(first);
        block.messages = rest.iter().map(Self::from_message).collect();
        Some(block)
    }
}

impl LintFormatter for TapFormatter {
    fn format<W: Write>(&self, results: &[PageResult], writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "TAP version 13")?;
        writeln!(writer, "1..{}", results.len())?;

        for (index, result) in results.iter().enumerate() {
            let status = if result.messages.is_empty() {
                "ok"
            } else {
                "not ok"
            };
            writeln!(writer, "{} {} - {}", status, index + 1, result.url)?;

            if let Some(block) = TapDiagnostic::collapse(&result.messages) {
                let yaml = serde_yaml::to_string(&block).map_err(std::io::Error::other)?;
                writeln!(writer, "  ---")?;
                for line in yaml.lines() {
                    writeln!(writer, "  {}", line)?;
                }
                writeln!(writer, "  ...")?;
            }
        }

        Ok(())
    }
}
