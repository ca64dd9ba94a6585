//! Lint diagnostics and report structures.
//!
//! This module provides the [`Diagnostic`] type for a single threshold
//! violation, the per-page [`PageResult`], and the run-wide [`LintReport`].
//! All three serialize with camelCase keys so the `json` formatter output
//! can be parsed straight back into them.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::rule::Severity;
use super::stats::Stats;

/// A diagnostic message produced by a lint rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The metric path of the rule that produced this diagnostic.
    pub rule_id: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// The measured value.
    pub actual: Value,
    /// Violated lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    /// Violated upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Expected value of an equality rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        actual: Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            actual,
            min: None,
            max: None,
            expected: None,
        }
    }

    /// Record the violated lower bound.
    pub fn with_min(mut self, min: Number) -> Self {
        self.min = Some(min);
        self
    }

    /// Record the violated upper bound.
    pub fn with_max(mut self, max: Number) -> Self {
        self.max = Some(max);
        self
    }

    /// Record the expected value of an equality rule.
    pub fn with_expected(mut self, expected: Value) -> Self {
        self.expected = Some(expected);
        self
    }

    /// The value the metric was compared against: `min`, then `max`, then `expected`.
    pub fn threshold(&self) -> Option<Value> {
        self.min
            .clone()
            .or_else(|| self.max.clone())
            .map(Value::Number)
            .or_else(|| self.expected.clone())
    }

    /// Whether this diagnostic fails the build.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Lint outcome for one page under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// URL of the tested page.
    #[serde(default)]
    pub url: String,
    /// Service-provided summary link or text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Diagnostics in rule declaration order.
    pub messages: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl PageResult {
    /// Build a page result, deriving counts from `messages`.
    pub fn new(url: impl Into<String>, summary: Option<String>, messages: Vec<Diagnostic>) -> Self {
        let stats = Stats::from_messages(&messages);
        Self {
            url: url.into(),
            summary,
            messages,
            error_count: stats.error_count,
            warning_count: stats.warning_count,
        }
    }

    /// Counts for this page.
    pub fn stats(&self) -> Stats {
        Stats {
            error_count: self.error_count,
            warning_count: self.warning_count,
        }
    }
}

/// Full output of one lint run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// One entry per page, in input order.
    pub results: Vec<PageResult>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintReport {
    /// Build a report whose totals are the sum over `results`.
    pub fn from_results(results: Vec<PageResult>) -> Self {
        let stats = results
            .iter()
            .fold(Stats::default(), |acc, page| acc + page.stats());
        Self {
            results,
            error_count: stats.error_count,
            warning_count: stats.warning_count,
        }
    }

    /// Run-wide counts.
    pub fn stats(&self) -> Stats {
        Stats {
            error_count: self.error_count,
            warning_count: self.warning_count,
        }
    }
}

/// Render a JSON value the way it reads in a message: strings unquoted.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn diagnostic_creation() {
        let diag = Diagnostic::new("loadTime", Severity::Error, json!(5000), "Load time");

        assert_eq!(diag.rule_id, "loadTime");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.actual, json!(5000));
        assert!(diag.min.is_none());
        assert!(diag.max.is_none());
        assert!(diag.expected.is_none());
        assert!(diag.is_error());
    }

    #[test]
    fn threshold_prefers_min_then_max_then_expected() {
        let base = Diagnostic::new("m", Severity::Warning, json!(1), "msg");
        assert_eq!(base.threshold(), None);
        assert_eq!(
            base.clone().with_max(Number::from(3)).threshold(),
            Some(json!(3))
        );
        assert_eq!(
            base.clone()
                .with_max(Number::from(3))
                .with_min(Number::from(2))
                .threshold(),
            Some(json!(2))
        );
        assert_eq!(
            base.with_expected(json!("nginx")).threshold(),
            Some(json!("nginx"))
        );
    }

    #[test]
    fn diagnostic_serializes_camel_case_and_omits_absent_bounds() {
        let diag = Diagnostic::new(
            "median.firstView.responses_404",
            Severity::Error,
            json!(2),
            "404s",
        )
        .with_max(Number::from(0));

        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["ruleId"], "median.firstView.responses_404");
        assert_eq!(value["severity"], 2);
        assert_eq!(value["actual"], 2);
        assert_eq!(value["max"], 0);
        assert!(value.get("min").is_none());
        assert!(value.get("expected").is_none());
    }

    #[test]
    fn page_result_counts_messages() {
        let page = PageResult::new(
            "https://example.com",
            None,
            vec![
                Diagnostic::new("a", Severity::Error, json!(1), "a"),
                Diagnostic::new("b", Severity::Warning, json!(1), "b"),
                Diagnostic::new("c", Severity::Warning, json!(1), "c"),
            ],
        );
        assert_eq!(page.error_count, 1);
        assert_eq!(page.warning_count, 2);
    }

    #[test]
    fn report_totals_sum_all_pages() {
        let report = LintReport::from_results(vec![
            PageResult::new(
                "https://a.example",
                None,
                vec![Diagnostic::new("a", Severity::Error, json!(1), "a")],
            ),
            PageResult::new("https://b.example", None, vec![]),
            PageResult::new(
                "https://c.example",
                None,
                vec![
                    Diagnostic::new("a", Severity::Error, json!(1), "a"),
                    Diagnostic::new("b", Severity::Warning, json!(1), "b"),
                ],
            ),
        ]);
        assert_eq!(report.error_count, 2);
        assert_eq!(report.warning_count, 1);
    }

    #[test]
    fn empty_report_has_zero_counts() {
        let report = LintReport::from_results(vec![]);
        assert_eq!(report.stats(), Stats::default());
    }

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(&json!("nginx")), "nginx");
        assert_eq!(display_value(&json!(2)), "2");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
