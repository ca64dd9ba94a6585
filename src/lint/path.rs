//! Metric path parsing and resolution.
//!
//! A [`MetricPath`] is a dotted path such as `median.firstView.responses_404`
//! that addresses a value inside a nested measurement document. Every segment
//! is treated as a plain object key, including numeric-looking ones, since
//! measurement documents are record-shaped.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{PerflintError, Result};

/// A validated, dotted metric path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricPath {
    raw: String,
    segments: Vec<String>,
}

impl MetricPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMetricPath` for an empty string, a leading or trailing
    /// dot, or an empty segment (`a..b`).
    pub fn parse(raw: &str) -> Result<Self> {
        let reason = if raw.is_empty() {
            Some("path is empty")
        } else if raw.starts_with('.') {
            Some("leading dot")
        } else if raw.ends_with('.') {
            Some("trailing dot")
        } else if raw.contains("..") {
            Some("empty segment")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(PerflintError::InvalidMetricPath {
                path: raw.to_string(),
                reason: reason.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            segments: raw.split('.').map(str::to_string).collect(),
        })
    }

    /// The path as written in configuration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Resolve this path against a document.
    ///
    /// Returns `None` when any segment is absent, when an intermediate value
    /// is not an object, or when the value reached is `null`.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| current.as_object()?.get(segment))
            .filter(|value| !value.is_null())
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for MetricPath {
    type Err = PerflintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse `path` and resolve it against `document` in one step.
///
/// A well-formed path that does not exist yields `Ok(None)`; only malformed
/// path strings are errors.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    Ok(MetricPath::parse(path)?.resolve(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "url": "https://example.com",
            "median": {
                "firstView": {
                    "responses_404": 2,
                    "loadTime": 1834,
                    "server": "nginx",
                    "pages": { "details": "https://wpt/details" }
                }
            },
            "runs": { "1": { "TTFB": 310 } },
            "list": [10, 20],
            "empty": null
        })
    }

    #[test]
    fn resolves_nested_path() {
        let doc = document();
        let value = resolve(&doc, "median.firstView.responses_404").unwrap();
        assert_eq!(value, Some(&json!(2)));
    }

    #[test]
    fn resolves_single_segment() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "url").unwrap(),
            Some(&json!("https://example.com"))
        );
    }

    #[test]
    fn resolves_deep_path() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "median.firstView.pages.details").unwrap(),
            Some(&json!("https://wpt/details"))
        );
    }

    #[test]
    fn numeric_segment_is_object_key() {
        let doc = document();
        assert_eq!(resolve(&doc, "runs.1.TTFB").unwrap(), Some(&json!(310)));
    }

    #[test]
    fn numeric_segment_does_not_index_arrays() {
        let doc = document();
        assert_eq!(resolve(&doc, "list.0").unwrap(), None);
    }

    #[test]
    fn missing_segment_is_none() {
        let doc = document();
        assert_eq!(resolve(&doc, "median.repeatView.loadTime").unwrap(), None);
        assert_eq!(resolve(&doc, "nope").unwrap(), None);
    }

    #[test]
    fn descending_through_scalar_is_none() {
        let doc = document();
        assert_eq!(resolve(&doc, "median.firstView.loadTime.value").unwrap(), None);
    }

    #[test]
    fn null_value_is_none() {
        let doc = document();
        assert_eq!(resolve(&doc, "empty").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", ".median", "median.", "median..firstView"] {
            let err = MetricPath::parse(bad).unwrap_err();
            assert!(
                matches!(err, PerflintError::InvalidMetricPath { .. }),
                "expected InvalidMetricPath for {:?}",
                bad
            );
        }
    }

    #[test]
    fn malformed_path_errors_on_resolve() {
        let doc = document();
        assert!(resolve(&doc, "median.").is_err());
    }

    #[test]
    fn parse_exposes_segments_and_display() {
        let path: MetricPath = "median.firstView.TTFB".parse().unwrap();
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["median", "firstView", "TTFB"]
        );
        assert_eq!(path.to_string(), "median.firstView.TTFB");
        assert_eq!(path.as_str(), "median.firstView.TTFB");
    }
}
