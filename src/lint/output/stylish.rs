//! Stylish output formatter.
//!
//! Groups diagnostics under an underlined page heading and lays them out as
//! an aligned table, followed by a one-line problem summary.

use super::LintFormatter;
use crate::lint::{PageResult, Severity, Stats};
use crate::ui::PerflintTheme;
use console::measure_text_width;
use std::io::Write;

/// Formats lint output as a terminal table.
#[derive(Debug, Clone)]
pub struct StylishFormatter {
    theme: PerflintTheme,
}

impl StylishFormatter {
    /// Create a new stylish formatter.
    pub fn new(use_color: bool) -> Self {
        let theme = if use_color {
            PerflintTheme::new()
        } else {
            PerflintTheme::plain()
        };
        Self { theme }
    }

    fn heading(&self, result: &PageResult) -> String {
        let text = match &result.summary {
            Some(summary) => format!("{} — {}", result.url, summary),
            None => result.url.clone(),
        };
        self.theme.heading.apply_to(text).to_string()
    }

    fn row(&self, severity: Severity, message: &str, rule_id: &str) -> [String; 3] {
        let kind = match severity {
            Severity::Error => self.theme.error.apply_to("error"),
            Severity::Warning => self.theme.warning.apply_to("warning"),
        };
        [
            kind.to_string(),
            message.strip_suffix('.').unwrap_or(message).to_string(),
            self.theme.dim.apply_to(rule_id).to_string(),
        ]
    }
}

impl Default for StylishFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LintFormatter for StylishFormatter {
    fn format<W: Write>(&self, results: &[PageResult], writer: &mut W) -> std::io::Result<()> {
        let stats = results
            .iter()
            .fold(Stats::default(), |acc, page| acc + Stats::from_messages(&page.messages));
        let (errors, warnings) = (stats.error_count, stats.warning_count);
        let total = stats.total();
        if total == 0 {
            return Ok(());
        }

        writeln!(writer)?;

        for result in results.iter().filter(|r| !r.messages.is_empty()) {
            writeln!(writer, "{}", self.heading(result))?;

            let rows: Vec<[String; 3]> = result
                .messages
                .iter()
                .map(|m| self.row(m.severity, &m.message, &m.rule_id))
                .collect();
            writeln!(writer, "{}", table(&rows))?;
            writeln!(writer)?;
        }

        let summary = format!(
            "\u{2716} {} {} ({} {}, {} {})",
            total,
            pluralize("problem", total),
            errors,
            pluralize("error", errors),
            warnings,
            pluralize("warning", warnings)
        );
        let style = if errors > 0 {
            &self.theme.summary_error
        } else {
            &self.theme.summary_warning
        };
        writeln!(writer, "{}", style.apply_to(summary))
    }
}

/// Lay out rows with a leading empty column, the first column right-aligned,
/// the rest left-aligned, and two spaces between columns.
fn table(rows: &[[String; 3]]) -> String {
    let mut widths = [0usize; 3];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    rows.iter()
        .map(|row| {
            let pad = |i: usize| " ".repeat(widths[i] - measure_text_width(&row[i]));
            let line = format!(
                "  {}{}  {}{}  {}",
                pad(0),
                row[0],
                row[1],
                pad(1),
                row[2]
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
