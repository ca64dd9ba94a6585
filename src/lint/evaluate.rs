//! Single-rule evaluation.
//!
//! [`evaluate`] compares one resolved metric value against one rule and
//! produces at most one [`Diagnostic`].

use serde_json::{Number, Value};

use super::diagnostic::{display_value, Diagnostic};
use super::rule::{EqualityRule, RangeRule, RuleSpec};

/// Evaluate `rule` against the resolved metric value.
///
/// A missing metric (`None`) produces no diagnostic and is logged as a
/// warning. Range rules against non-numeric values are a no-op. When both
/// bounds are violated, `max` wins.
pub fn evaluate(rule: &RuleSpec, actual: Option<&Value>) -> Option<Diagnostic> {
    let Some(actual) = actual else {
        tracing::warn!("Metric not found: '{}'", rule.metric());
        return None;
    };

    match rule {
        RuleSpec::Range(range) => evaluate_range(range, actual),
        RuleSpec::Equality(equality) => evaluate_equality(equality, actual),
    }
}

fn evaluate_range(rule: &RangeRule, actual: &Value) -> Option<Diagnostic> {
    let Some(value) = actual.as_f64() else {
        tracing::debug!(
            "Skipping range check on non-numeric metric '{}' ({})",
            rule.metric,
            actual
        );
        return None;
    };

    if let Some(max) = rule.max.as_ref().filter(|max| exceeds(value, max)) {
        return Some(
            Diagnostic::new(
                rule.metric.as_str(),
                rule.severity,
                actual.clone(),
                format!(
                    "{} - is {} should not be greater than {}",
                    rule.message,
                    display_value(actual),
                    max
                ),
            )
            .with_max(max.clone()),
        );
    }

    if let Some(min) = rule.min.as_ref().filter(|min| below(value, min)) {
        return Some(
            Diagnostic::new(
                rule.metric.as_str(),
                rule.severity,
                actual.clone(),
                format!(
                    "{} - is {} should be greater than {}",
                    rule.message,
                    display_value(actual),
                    min
                ),
            )
            .with_min(min.clone()),
        );
    }

    None
}

fn evaluate_equality(rule: &EqualityRule, actual: &Value) -> Option<Diagnostic> {
    if values_equal(actual, &rule.expected) {
        return None;
    }

    Some(
        Diagnostic::new(
            rule.metric.as_str(),
            rule.severity,
            actual.clone(),
            format!(
                "'{}' is {} should be {}",
                rule.metric,
                display_value(actual),
                display_value(&rule.expected)
            ),
        )
        .with_expected(rule.expected.clone()),
    )
}

fn exceeds(value: f64, max: &Number) -> bool {
    max.as_f64().is_some_and(|max| value > max)
}

fn below(value: f64, min: &Number) -> bool {
    min.as_f64().is_some_and(|min| value < min)
}

/// Strict equality, except that numbers compare by value (`2 == 2.0`).
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}
