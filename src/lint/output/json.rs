//! JSON output formatter.
//!
//! Serializes the page results as a compact JSON array for tooling
//! integration. The output parses back into `Vec<PageResult>`.

use super::LintFormatter;
use crate::lint::PageResult;
use std::io::Write;

/// Formats lint output as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, results: &[PageResult], writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer(writer, results).map_err(std::io::Error::other)
    }
}
