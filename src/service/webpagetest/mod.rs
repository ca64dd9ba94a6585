//! WebPageTest acquisition.
//!
//! - [`WebPageTestClient`] - Blocking HTTP client for the JSON API
//! - [`translate`] - Converts a result document into a page record
//! - [`TestInfo`] - Details printed with `--info`
//! - [`fetch_results`] - Runs (or fetches) every configured test in order

pub mod client;
pub mod info;
pub mod translate;

pub use client::{
    normalize_server, TestOptions, TestStatus, WebPageTestClient, DEFAULT_SERVER, POLL_INTERVAL,
};
pub use info::TestInfo;
pub use translate::{translate, DATASET_KEY};

use serde_json::Value;
use std::time::Duration;

use crate::config::PerflintConfig;
use crate::error::Result;

/// Progress events reported while acquiring results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<'a> {
    /// A test was submitted for a URL.
    Submitted { url: &'a str, id: &'a str },
    /// The server reported a status for a pending test.
    Status { id: &'a str, status: &'a TestStatus },
    /// Results for a test are being downloaded.
    Fetching { id: &'a str },
}

/// Acquire raw result documents for the configured targets.
///
/// An existing `test` id is fetched directly; otherwise each URL is run in
/// turn, polled until complete, and fetched. The first failure aborts.
pub fn fetch_results<F>(
    client: &WebPageTestClient,
    config: &PerflintConfig,
    mut on_progress: F,
) -> Result<Vec<Value>>
where
    F: FnMut(Progress<'_>),
{
    if let Some(id) = &config.test {
        tracing::debug!("Get WebPageTest results for: {}", id);
        on_progress(Progress::Fetching { id });
        return Ok(vec![client.test_results(id)?]);
    }

    let options = TestOptions::from_config(config);
    let timeout = Duration::from_secs(config.timeout);
    let mut results = Vec::with_capacity(config.urls.len());

    for url in &config.urls {
        tracing::debug!("Get WebPageTest results for: {}", url);
        let id = client.run_test(url, &options)?;
        on_progress(Progress::Submitted { url, id: &id });

        client.wait_for_results(&id, timeout, |status| {
            on_progress(Progress::Status { id: &id, status })
        })?;

        on_progress(Progress::Fetching { id: &id });
        results.push(client.test_results(&id)?);
    }

    Ok(results)
}
