//! The lint engine.
//!
//! Walks every page record, evaluates every rule group against the dataset it
//! names, and assembles a [`LintReport`]. Pages keep input order; within a
//! page, diagnostics follow rule declaration order.

use serde_json::Value;

use super::diagnostic::{LintReport, PageResult};
use super::evaluate::evaluate;
use super::rule::{RuleGroup, RuleSet};

/// Lint all page records against the rule set.
///
/// An empty `documents` slice yields an empty report with zero counts.
pub fn lint(rules: &RuleSet, documents: &[Value]) -> LintReport {
    tracing::debug!(
        "Linting {} page(s) against {} rule(s)",
        documents.len(),
        rules.len()
    );
    let results = documents
        .iter()
        .map(|record| lint_page(rules, record))
        .collect();
    LintReport::from_results(results)
}

/// Lint a single page record.
///
/// Counts are computed only after every rule for the page has been evaluated.
pub fn lint_page(rules: &RuleSet, record: &Value) -> PageResult {
    let mut messages = Vec::new();

    for group in rules.groups() {
        let document = select_dataset(record, group);
        messages.extend(
            group
                .rules
                .iter()
                .filter_map(|rule| evaluate(rule, rule.metric().resolve(document))),
        );
    }

    let url = page_field(record, rules, &["url", "URL"]).unwrap_or_default();
    let summary = page_field(record, rules, &["summary"]);
    PageResult::new(url, summary, messages)
}

/// Split acquired measurement input into page records.
///
/// An array is one record per element; `null` is no records; any other value
/// is a single record (e.g. an object keyed by dataset name).
pub fn page_records(input: Value) -> Vec<Value> {
    match input {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        record => vec![record],
    }
}

/// The document a group's rules are evaluated against.
///
/// A group keyed `K` uses `record[K]` when the record stores that dataset
/// under the exact key `K`, and the record itself otherwise.
fn select_dataset<'a>(record: &'a Value, group: &RuleGroup) -> &'a Value {
    group
        .dataset
        .as_deref()
        .and_then(|key| record.get(key))
        .unwrap_or(record)
}

/// Read a string field from the record root, falling back to each dataset.
fn page_field(record: &Value, rules: &RuleSet, names: &[&str]) -> Option<String> {
    let from = |doc: &Value| {
        names
            .iter()
            .find_map(|name| doc.get(*name).and_then(Value::as_str))
            .map(str::to_string)
    };

    from(record).or_else(|| {
        rules
            .groups()
            .filter_map(|group| group.dataset.as_deref().and_then(|key| record.get(key)))
            .find_map(from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rule::Severity;
    use serde_json::{json, Map, Number};

    fn rules(value: Value) -> RuleSet {
        match value {
            Value::Object(map) => RuleSet::from_config(&map),
            _ => RuleSet::from_config(&Map::new()),
        }
    }

    fn page(url: &str, responses_404: i64, load_time: i64) -> Value {
        json!({
            "url": url,
            "summary": format!("{}/summary", url),
            "median": {
                "firstView": {
                    "responses_404": responses_404,
                    "loadTime": load_time
                }
            }
        })
    }

    #[test]
    fn reports_404_violation() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [{
                "metric": "median.firstView.responses_404",
                "message": "404 responses",
                "max": 0,
                "severity": "error"
            }]
        }));

        let report = lint(&rules, &[page("https://example.com", 2, 1000)]);

        assert_eq!(report.results.len(), 1);
        let messages = &report.results[0].messages;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].rule_id, "median.firstView.responses_404");
        assert_eq!(messages[0].severity, Severity::Error);
        assert_eq!(messages[0].actual, json!(2));
        assert_eq!(messages[0].max, Some(Number::from(0)));
        assert_eq!(report.error_count, 1);
        assert_eq!(report.warning_count, 0);
    }

    #[test]
    fn pages_keep_input_order_and_totals_sum() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [
                { "metric": "median.firstView.responses_404", "max": 0, "severity": "error" },
                { "metric": "median.firstView.loadTime", "max": 3000, "severity": "warning" }
            ]
        }));

        let report = lint(
            &rules,
            &[
                page("https://a.example", 0, 1000),
                page("https://b.example", 3, 5000),
                page("https://c.example", 0, 4000),
            ],
        );

        let urls: Vec<_> = report.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["https://a.example", "https://b.example", "https://c.example"]);
        assert!(report.results[0].messages.is_empty());
        assert_eq!(report.results[1].error_count, 1);
        assert_eq!(report.results[1].warning_count, 1);
        assert_eq!(report.results[2].warning_count, 1);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.warning_count, 2);
    }

    #[test]
    fn diagnostics_follow_rule_declaration_order() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [
                { "metric": "median.firstView.loadTime", "max": 1, "severity": "warning" },
                { "metric": "median.firstView.responses_404", "max": 0, "severity": "error" }
            ],
            "bytesIn": [{ "max": 10 }, "warning"]
        }));

        let mut record = page("https://example.com", 1, 2);
        record["bytesIn"] = json!(20);
        let report = lint(&rules, &[record]);

        let ids: Vec<_> = report.results[0]
            .messages
            .iter()
            .map(|m| m.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            [
                "median.firstView.loadTime",
                "median.firstView.responses_404",
                "bytesIn"
            ]
        );
    }

    #[test]
    fn dataset_key_selects_nested_document() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [
                { "metric": "median.firstView.responses_404", "max": 0, "severity": "error" }
            ]
        }));
        let record = json!({
            "url": "https://example.com",
            "webpagetest.pageSummary": {
                "summary": "https://wpt/result",
                "median": { "firstView": { "responses_404": 4 } }
            }
        });

        let result = lint_page(&rules, &record);

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.summary.as_deref(), Some("https://wpt/result"));
    }

    #[test]
    fn missing_metrics_are_skipped_not_fatal() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [
                { "metric": "median.repeatView.loadTime", "max": 0 },
                { "metric": "median.firstView.responses_404", "max": 0 }
            ]
        }));

        let report = lint(&rules, &[page("https://example.com", 1, 0)]);

        assert_eq!(report.results[0].messages.len(), 1);
        assert_eq!(report.error_count, 1);
    }

    #[test]
    fn invalid_rules_do_not_abort_the_batch() {
        let rules = rules(json!({
            "webpagetest.pageSummary": [
                { "metric": "median..loadTime", "max": 0 },
                { "metric": "median.firstView.responses_404" },
                { "metric": "median.firstView.loadTime", "max": 10 }
            ]
        }));

        let report = lint(&rules, &[page("https://example.com", 1, 20)]);

        assert_eq!(report.results[0].messages.len(), 1);
        assert_eq!(
            report.results[0].messages[0].rule_id,
            "median.firstView.loadTime"
        );
    }

    #[test]
    fn legacy_uppercase_url_is_read() {
        let rules = rules(json!({ "loadTime": [{ "max": 100 }, "error"] }));
        let record = json!({ "URL": "https://legacy.example", "loadTime": 200 });

        let result = lint_page(&rules, &record);

        assert_eq!(result.url, "https://legacy.example");
        assert_eq!(
            result.messages[0].message,
            "'loadTime' - is 200 should not be greater than 100"
        );
    }

    #[test]
    fn empty_documents_yield_empty_report() {
        let rules = rules(json!({ "loadTime": [{ "max": 1 }, "error"] }));
        let report = lint(&rules, &[]);
        assert!(report.results.is_empty());
        assert_eq!(report.error_count, 0);
        assert_eq!(report.warning_count, 0);
    }

    #[test]
    fn page_records_normalizes_input() {
        assert_eq!(page_records(json!([{ "a": 1 }, { "a": 2 }])).len(), 2);
        assert_eq!(page_records(json!({ "webpagetest.pageSummary": {} })).len(), 1);
        assert!(page_records(Value::Null).is_empty());
    }
}
