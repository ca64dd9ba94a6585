//! Threshold linting of performance measurements.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Rules** - Normalized thresholds loaded from configuration ([`RuleSet`])
//! - **Paths** - Dotted metric addresses into measurement documents ([`MetricPath`])
//! - **Engine** - Evaluates every rule against every page ([`lint`])
//! - **Diagnostics** - Per-page violations and counts ([`LintReport`])
//! - **Output** - Stylish, JSON, JUnit and TAP renderers ([`output`])
//! - **Exit policy** - Maps counts to a process exit code ([`ExitPolicy`])
//!
//! # Example
//!
//! ```
//! use perflint::lint::{lint, RuleSet};
//! use serde_json::json;
//!
//! let config = json!({
//!     "webpagetest.pageSummary": [
//!         { "metric": "median.firstView.responses_404", "max": 0, "severity": "error" }
//!     ]
//! });
//! let rules = RuleSet::from_config(config.as_object().unwrap());
//!
//! let page = json!({
//!     "url": "https://example.com",
//!     "median": { "firstView": { "responses_404": 2 } }
//! });
//! let report = lint(&rules, &[page]);
//!
//! assert_eq!(report.error_count, 1);
//! assert_eq!(report.results[0].messages[0].rule_id, "median.firstView.responses_404");
//! ```

pub mod diagnostic;
pub mod engine;
pub mod evaluate;
pub mod exit;
pub mod output;
pub mod path;
pub mod rule;
pub mod stats;

pub use diagnostic::{Diagnostic, LintReport, PageResult};
pub use engine::{lint, lint_page, page_records};
pub use evaluate::evaluate;
pub use exit::{ExitPolicy, ExitStatus};
pub use output::{get_formatter, LintFormatter, OutputFormat};
pub use path::{resolve, MetricPath};
pub use rule::{EqualityRule, RangeRule, RuleGroup, RuleSet, RuleSpec, Severity};
pub use stats::{aggregate, Stats};
