//! Conversion of WebPageTest results into page records.
//!
//! A page record carries the selected run's metrics flattened at the root
//! (for rules keyed by bare metric name) and the untouched result document
//! under [`DATASET_KEY`] (for rule groups with dotted metric paths).

use serde_json::{Map, Value};

use crate::error::{PerflintError, Result};

/// Dataset key under which the raw result document is stored.
pub const DATASET_KEY: &str = "webpagetest.pageSummary";

/// Request breakdown categories and the flattened metric each becomes.
const BREAKDOWN: [(&str, &str); 7] = [
    ("html", "requestsHTML"),
    ("js", "requestsJS"),
    ("css", "requestsCSS"),
    ("image", "requestsImage"),
    ("flash", "requestsFlash"),
    ("font", "requestsFont"),
    ("other", "requestsOther"),
];

/// Build a page record from a `jsonResult.php` data document.
///
/// `average` picks the aggregate (`median`, `average`, ...) and `view` the
/// run view (`firstView`, `repeatView`).
///
/// # Errors
///
/// Returns `Acquisition` when `data` has no such aggregate or view.
pub fn translate(average: &str, view: &str, data: &Value) -> Result<Value> {
    tracing::debug!("Converting WebPageTest results to page record");

    let aggregate = data
        .get(average)
        .filter(|v| v.is_object())
        .ok_or_else(|| invalid("Invalid 'average' specified in config"))?;
    let run = aggregate
        .get(view)
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("Invalid 'view' specified in config"))?;

    let mut record = Map::new();

    let breakdown = run.get("breakdown");
    for (category, metric) in BREAKDOWN {
        if let Some(requests) = breakdown.and_then(|b| b.get(category)).and_then(request_count) {
            record.insert(metric.to_string(), requests);
        }
    }

    for (name, value) in run {
        if name != "breakdown" {
            record.insert(name.clone(), value.clone());
        }
    }

    for field in ["id", "url", "summary"] {
        if let Some(value) = data.get(field) {
            record.insert(field.to_string(), value.clone());
        }
    }
    record.insert(DATASET_KEY.to_string(), data.clone());

    Ok(Value::Object(record))
}

/// Request count of one breakdown entry: either `{ "requests": n, .. }` or a bare number.
fn request_count(entry: &Value) -> Option<Value> {
    match entry {
        Value::Object(fields) => fields.get("requests").cloned(),
        Value::Number(_) => Some(entry.clone()),
        _ => None,
    }
}

fn invalid(message: &str) -> PerflintError {
    PerflintError::Acquisition {
        message: message.to_string(),
    }
}
