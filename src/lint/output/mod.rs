//! Lint output formatters.
//!
//! This module provides formatters for outputting lint results in
//! different formats (stylish, JSON, JUnit XML, TAP). Every formatter is a
//! pure function of the page results; writing the text is the caller's job.

pub mod json;
pub mod junit;
pub mod stylish;
pub mod tap;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::PerflintError;
use crate::lint::PageResult;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Stylish,
    Junit,
    Tap,
}

/// A formatter entry point: page results in, rendered text out.
pub type RenderFn = fn(&[PageResult]) -> String;

impl OutputFormat {
    /// Every registered format.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Json,
        OutputFormat::Stylish,
        OutputFormat::Junit,
        OutputFormat::Tap,
    ];

    /// Look up a format by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// The registered name of this format.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Stylish => "stylish",
            OutputFormat::Junit => "junit",
            OutputFormat::Tap => "tap",
        }
    }

    /// The render function for this format.
    pub fn renderer(self) -> RenderFn {
        match self {
            OutputFormat::Json => render_json,
            OutputFormat::Stylish => render_stylish,
            OutputFormat::Junit => render_junit,
            OutputFormat::Tap => render_tap,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = PerflintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PerflintError::UnknownFormat {
            name: s.to_string(),
        })
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format page results to the given writer.
    fn format<W: Write>(&self, results: &[PageResult], writer: &mut W) -> std::io::Result<()>;
}

/// Find the formatter registered under `name`.
///
/// Returns `None` for unknown names.
pub fn get_formatter(name: &str) -> Option<RenderFn> {
    tracing::debug!("Setting formatter: {}", name);
    OutputFormat::from_name(name).map(OutputFormat::renderer)
}

/// Render results as compact JSON.
pub fn render_json(results: &[PageResult]) -> String {
    render(&JsonFormatter, results)
}

/// Render results as a colorized table when the terminal supports it.
pub fn render_stylish(results: &[PageResult]) -> String {
    render(
        &StylishFormatter::new(crate::ui::should_use_colors()),
        results,
    )
}

/// Render results as JUnit XML.
pub fn render_junit(results: &[PageResult]) -> String {
    render(&JunitFormatter, results)
}

/// Render results as TAP version 13.
pub fn render_tap(results: &[PageResult]) -> String {
    render(&TapFormatter, results)
}

fn render<F: LintFormatter>(formatter: &F, results: &[PageResult]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec only fails if the formatter itself errors.
    if let Err(e) = formatter.format(results, &mut buffer) {
        tracing::error!("Formatter failed: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

pub use json::JsonFormatter;
pub use junit::JunitFormatter;
pub use stylish::StylishFormatter;
pub use tap::TapFormatter;
