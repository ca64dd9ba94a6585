//! PerfLint - lint web page performance measurements.
//!
//! PerfLint checks measurement documents (typically WebPageTest results)
//! against configured thresholds and reports violations the way a code
//! linter does, with a CI-friendly exit status.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.perflintrc` discovery, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Rule evaluation, reports, and output formatters
//! - [`service`] - Measurement acquisition from WebPageTest
//! - [`ui`] - Terminal output and spinners
//!
//! # Example
//!
//! ```
//! use perflint::lint::output::render_tap;
//! use perflint::lint::{lint, RuleSet};
//! use serde_json::json;
//!
//! let rules = json!({ "loadTime": [{ "max": 3000 }, "warning"] });
//! let rules = RuleSet::from_config(rules.as_object().unwrap());
//!
//! let report = lint(&rules, &[json!({ "url": "https://example.com", "loadTime": 4200 })]);
//! assert_eq!(report.warning_count, 1);
//! assert!(render_tap(&report.results).contains("not ok 1 - https://example.com"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod service;
pub mod ui;

pub use error::{PerflintError, Result};
