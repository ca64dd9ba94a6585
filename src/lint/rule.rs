//! Lint rule definitions.
//!
//! This module provides the types that describe configured thresholds:
//!
//! - [`Severity`] - Severity level for diagnostics (Warning, Error)
//! - [`RuleSpec`] - One normalized constraint, either a range or an equality check
//! - [`RuleGroup`] - Ordered rules evaluated against one dataset of a page
//! - [`RuleSet`] - All groups, normalized once from raw configuration
//!
//! Two configuration shapes are accepted. The grouped shape maps a dataset
//! key to a list of rule objects:
//!
//! ```json
//! { "webpagetest.pageSummary": [
//!     { "metric": "median.firstView.loadTime", "message": "Load time", "max": 3000, "severity": "error" }
//! ] }
//! ```
//!
//! The legacy shape maps a metric to an `[expected, severity]` tuple, where
//! `expected` is either a scalar or a `{ "min": .., "max": .. }` object:
//!
//! ```json
//! { "loadTime": [{ "max": 3000 }, "warning"], "responses_404": [0, "error"] }
//! ```

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use super::path::MetricPath;
use crate::error::{PerflintError, Result};

/// Severity level for lint diagnostics.
///
/// Serialized numerically: `1` for warnings, `2` for errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Counted against the optional `maxWarnings` threshold.
    Warning,
    /// Fails the build.
    Error,
}

impl Severity {
    /// Numeric level (`1` = warning, `2` = error).
    pub fn level(self) -> u8 {
        match self {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Build from a numeric level.
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// Parse a configured severity: `"error"`, `"warning"`, `"warn"`, `2` or `1`.
    pub fn from_config(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "error" => Some(Severity::Error),
                "warning" | "warn" => Some(Severity::Warning),
                _ => None,
            },
            Value::Number(n) => n.as_u64().and_then(Self::from_level),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let level = u64::deserialize(deserializer)?;
        Severity::from_level(level)
            .ok_or_else(|| D::Error::custom(format!("invalid severity level {}", level)))
    }
}

/// A min/max threshold on a numeric metric.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRule {
    pub metric: MetricPath,
    pub message: String,
    pub min: Option<Number>,
    pub max: Option<Number>,
    pub severity: Severity,
}

/// An exact expected value for a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityRule {
    pub metric: MetricPath,
    pub expected: Value,
    pub severity: Severity,
}

/// One configured constraint, normalized from either configuration shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    Range(RangeRule),
    Equality(EqualityRule),
}

impl RuleSpec {
    /// The metric this rule checks.
    pub fn metric(&self) -> &MetricPath {
        match self {
            RuleSpec::Range(rule) => &rule.metric,
            RuleSpec::Equality(rule) => &rule.metric,
        }
    }

    /// Severity of diagnostics produced by this rule.
    pub fn severity(&self) -> Severity {
        match self {
            RuleSpec::Range(rule) => rule.severity,
            RuleSpec::Equality(rule) => rule.severity,
        }
    }

    /// Parse a grouped-shape rule object.
    ///
    /// `metric` (or `metricPath`) is required. `message` defaults to the
    /// quoted metric path and `severity` defaults to `error`. An object with
    /// neither `min` nor `max` is an equality rule when it carries `value`
    /// (or `expected`), and invalid otherwise.
    pub fn from_object(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("<unnamed>", "rule must be an object"))?;

        let raw_metric = obj
            .get("metric")
            .or_else(|| obj.get("metricPath"))
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("<unnamed>", "rule is missing 'metric'"))?;
        let metric = MetricPath::parse(raw_metric)?;

        let severity = match obj.get("severity") {
            None => Severity::Error,
            Some(raw) => Severity::from_config(raw)
                .ok_or_else(|| invalid(raw_metric, format!("unknown severity {}", raw)))?,
        };

        let min = bound(obj, "min", raw_metric)?;
        let max = bound(obj, "max", raw_metric)?;

        if min.is_none() && max.is_none() {
            let expected = obj
                .get("value")
                .or_else(|| obj.get("expected"))
                .ok_or_else(|| invalid(raw_metric, "rule must define 'min' or 'max'"))?;
            return equality(metric, expected, severity);
        }

        let message = match obj.get("message") {
            None => default_message(&metric),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(invalid(raw_metric, "'message' must be a string")),
        };

        Ok(RuleSpec::Range(RangeRule {
            metric,
            message,
            min,
            max,
            severity,
        }))
    }

    /// Parse a legacy `[expected, severity]` tuple for `metric`.
    pub fn from_tuple(metric: &str, value: &Value) -> Result<Self> {
        let (expected, level) = match value.as_array().map(Vec::as_slice) {
            Some([expected, level]) => (expected, level),
            _ => return Err(invalid(metric, "expected an [expected, severity] pair")),
        };

        let path = MetricPath::parse(metric)?;
        let severity = Severity::from_config(level)
            .ok_or_else(|| invalid(metric, format!("unknown severity {}", level)))?;

        match expected {
            Value::Object(range) => {
                let min = bound(range, "min", metric)?;
                let max = bound(range, "max", metric)?;
                if min.is_none() && max.is_none() {
                    return Err(invalid(metric, "range must define 'min' or 'max'"));
                }
                Ok(RuleSpec::Range(RangeRule {
                    message: default_message(&path),
                    metric: path,
                    min,
                    max,
                    severity,
                }))
            }
            scalar => equality(path, scalar, severity),
        }
    }
}

/// Rules evaluated against one dataset of each page.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    /// Dataset key in the page record, or `None` for the record root.
    pub dataset: Option<String>,
    /// Rules in declaration order.
    pub rules: Vec<RuleSpec>,
}

/// All configured rule groups, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    groups: Vec<RuleGroup>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the raw `rules` mapping from configuration.
    ///
    /// Rules that cannot be normalized are logged once and skipped; they never
    /// prevent the remaining rules from loading.
    pub fn from_config(rules: &Map<String, Value>) -> Self {
        let mut set = Self::new();

        for (key, value) in rules {
            if is_legacy_tuple(value) {
                match RuleSpec::from_tuple(key, value) {
                    Ok(rule) => set.push_root(rule),
                    Err(e) => tracing::warn!("Skipping rule: {}", e),
                }
                continue;
            }

            let Some(entries) = value.as_array() else {
                tracing::warn!(
                    "Skipping rule: {}",
                    invalid(key, "expected a list of rules or an [expected, severity] pair")
                );
                continue;
            };

            let mut rules = Vec::with_capacity(entries.len());
            for entry in entries {
                match RuleSpec::from_object(entry) {
                    Ok(rule) => rules.push(rule),
                    Err(e) => tracing::warn!("Skipping rule in '{}': {}", key, e),
                }
            }
            set.groups.push(RuleGroup {
                dataset: Some(key.clone()),
                rules,
            });
        }

        tracing::debug!("Loaded {} rule(s) in {} group(s)", set.len(), set.groups.len());
        set
    }

    /// Append a group.
    pub fn push(&mut self, group: RuleGroup) {
        self.groups.push(group);
    }

    /// Append a root-level rule, extending the trailing root group when there is one.
    fn push_root(&mut self, rule: RuleSpec) {
        match self.groups.last_mut() {
            Some(group) if group.dataset.is_none() => group.rules.push(rule),
            _ => self.groups.push(RuleGroup {
                dataset: None,
                rules: vec![rule],
            }),
        }
    }

    /// Iterate over groups in configuration order.
    pub fn groups(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups.iter()
    }

    /// Total number of rules across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_legacy_tuple(value: &Value) -> bool {
    match value.as_array().map(Vec::as_slice) {
        Some([first, second]) => {
            let grouped = first
                .as_object()
                .is_some_and(|o| o.contains_key("metric") || o.contains_key("metricPath"));
            !grouped && Severity::from_config(second).is_some()
        }
        _ => false,
    }
}

fn equality(metric: MetricPath, expected: &Value, severity: Severity) -> Result<RuleSpec> {
    if expected.is_null() {
        return Err(invalid(metric.as_str(), "expected value must not be null"));
    }
    Ok(RuleSpec::Equality(EqualityRule {
        metric,
        expected: expected.clone(),
        severity,
    }))
}

fn bound(obj: &Map<String, Value>, name: &str, metric: &str) -> Result<Option<Number>> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(other) => Err(invalid(
            metric,
            format!("'{}' must be a number, got {}", name, other),
        )),
    }
}

fn default_message(metric: &MetricPath) -> String {
    format!("'{}'", metric)
}

fn invalid(rule: &str, reason: impl Into<String>) -> PerflintError {
    PerflintError::InvalidRule {
        rule: rule.to_string(),
        reason: reason.into(),
    }
}
