//! JUnit XML output formatter.
//!
//! One `<testsuite>` per page with diagnostics, one `<testcase>` per
//! diagnostic. Errors become `<error>` elements, warnings `<failure>`.

use super::LintFormatter;
use crate::lint::diagnostic::display_value;
use crate::lint::{Diagnostic, PageResult, Severity};
use std::io::Write;

/// Formats lint output as JUnit XML.
#[derive(Debug, Default, Clone, Copy)]
pub struct JunitFormatter;

impl JunitFormatter {
    fn write_testcase<W: Write>(message: &Diagnostic, writer: &mut W) -> std::io::Result<()> {
        let (element, label) = match message.severity {
            Severity::Error => ("error", "Error"),
            Severity::Warning => ("failure", "Warning"),
        };
        let rule_id = if message.rule_id.is_empty() {
            "unknown"
        } else {
            message.rule_id.as_str()
        };
        let text = escape_xml(&message.message);
        let expected = message
            .threshold()
            .map(|v| display_value(&v))
            .unwrap_or_else(|| "null".to_string());

        write!(
            writer,
            "<testcase time=\"0\" name=\"org.perflint.{}\">",
            escape_xml(rule_id)
        )?;
        write!(writer, "<{} message=\"{}\">", element, text)?;
        write!(
            writer,
            "<![CDATA[actual {}, expected {}, {} - {}",
            display_value(&message.actual),
            expected,
            label,
            text
        )?;
        if !message.rule_id.is_empty() {
            write!(writer, " ({})", escape_xml(&message.rule_id))?;
        }
        writeln!(writer, "]]></{}></testcase>", element)
    }
}

impl LintFormatter for JunitFormatter {
    fn format<W: Write>(&self, results: &[PageResult], writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        writeln!(writer, "<testsuites>")?;

        for result in results.iter().filter(|r| !r.messages.is_empty()) {
            let count = result.messages.len();
            writeln!(
                writer,
                "<testsuite package=\"org.perflint\" time=\"0\" tests=\"{}\" errors=\"{}\" name=\"{}\">",
                count,
                count,
                escape_xml(&result.url)
            )?;
            for message in &result.messages {
                Self::write_testcase(message, writer)?;
            }
            writeln!(writer, "</testsuite>")?;
        }

        writeln!(writer, "</testsuites>")
    }
}

/// Escape the five XML special characters.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
