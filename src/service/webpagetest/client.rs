//! WebPageTest HTTP client.
//!
//! Talks to the public WebPageTest JSON API (`runtest.php`,
//! `testStatus.php`, `jsonResult.php`). Every response is an envelope
//! `{ "statusCode": .., "statusText": .., "data": .. }`; a `statusCode` of
//! 200 means success, 1xx means the test is still queued or running.

use anyhow::Context;
use serde_json::Value;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::PerflintConfig;
use crate::error::{PerflintError, Result};

/// Default public WebPageTest instance.
pub const DEFAULT_SERVER: &str = "www.webpagetest.org";

/// Interval between `testStatus.php` polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Per-request HTTP timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Options forwarded to `runtest.php`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Skip the repeat view.
    pub first_view_only: bool,
    pub location: Option<String>,
    pub connectivity: Option<String>,
    pub label: Option<String>,
    pub private: bool,
}

impl TestOptions {
    pub fn from_config(config: &PerflintConfig) -> Self {
        Self {
            first_view_only: config.view == "firstView",
            location: config.location.clone(),
            connectivity: config.connectivity.clone(),
            label: config.label.clone(),
            private: config.private,
        }
    }
}

/// Progress of a submitted test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestStatus {
    pub code: u64,
    pub text: String,
}

impl TestStatus {
    /// The test finished and results are available.
    pub fn is_complete(&self) -> bool {
        self.code == 200
    }

    /// The test is queued or running.
    pub fn is_pending(&self) -> bool {
        (100..200).contains(&self.code)
    }
}

/// Blocking client for one WebPageTest server.
///
/// # Example
///
/// ```no_run
/// use perflint::service::webpagetest::{TestOptions, WebPageTestClient};
/// use std::time::Duration;
///
/// let client = WebPageTestClient::new("www.webpagetest.org", Some("API_KEY".into())).unwrap();
/// let id = client.run_test("https://example.com", &TestOptions::default()).unwrap();
/// client.wait_for_results(&id, Duration::from_secs(120), |_| {}).unwrap();
/// let results = client.test_results(&id).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct WebPageTestClient {
    base_url: String,
    key: Option<String>,
    poll_interval: Duration,
    client: reqwest::blocking::Client,
}

impl WebPageTestClient {
    /// Create a client for `server`.
    ///
    /// A bare host name is served over `https://`.
    pub fn new(server: &str, key: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: normalize_server(server),
            key,
            poll_interval: POLL_INTERVAL,
            client,
        })
    }

    /// Override the status polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The server base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a test for `url` and return its id.
    pub fn run_test(&self, url: &str, options: &TestOptions) -> Result<String> {
        tracing::debug!("Submitting WebPageTest run for {}", url);

        let mut params = vec![("url", url.to_string()), ("f", "json".to_string())];
        if let Some(key) = &self.key {
            params.push(("k", key.clone()));
        }
        if options.first_view_only {
            params.push(("fvonly", "1".to_string()));
        }
        if let Some(location) = &options.location {
            params.push(("location", location.clone()));
        }
        if let Some(connectivity) = &options.connectivity {
            params.push(("connectivity", connectivity.clone()));
        }
        if let Some(label) = &options.label {
            params.push(("label", label.clone()));
        }
        if options.private {
            params.push(("private", "1".to_string()));
        }

        let envelope = self.get_json("runtest.php", &params)?;
        expect_ok(&envelope)?;

        envelope
            .pointer("/data/testId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| acquisition("response did not include a test id"))
    }

    /// Query the status of a submitted test.
    pub fn test_status(&self, id: &str) -> Result<TestStatus> {
        let params = [("test", id.to_string()), ("f", "json".to_string())];
        let envelope = self.get_json("testStatus.php", &params)?;
        let status = TestStatus {
            code: status_code(&envelope),
            text: status_text(&envelope),
        };

        if !status.is_complete() && !status.is_pending() {
            return Err(acquisition(status.text));
        }
        Ok(status)
    }

    /// Poll until the test completes or `timeout` elapses.
    ///
    /// `on_status` sees every status response, including the final one.
    pub fn wait_for_results<F>(&self, id: &str, timeout: Duration, mut on_status: F) -> Result<()>
    where
        F: FnMut(&TestStatus),
    {
        let started = Instant::now();

        loop {
            let status = self.test_status(id)?;
            tracing::debug!("Test {} status {}: {}", id, status.code, status.text);
            on_status(&status);

            if status.is_complete() {
                return Ok(());
            }
            if started.elapsed() + self.poll_interval > timeout {
                return Err(PerflintError::Timeout {
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(self.poll_interval);
        }
    }

    /// Fetch the full results of a completed test.
    pub fn test_results(&self, id: &str) -> Result<Value> {
        let params = [
            ("test", id.to_string()),
            ("breakdown", "1".to_string()),
            ("domains", "1".to_string()),
            ("pagespeed", "1".to_string()),
            ("requests", "0".to_string()),
        ];
        let mut envelope = self.get_json("jsonResult.php", &params)?;
        expect_ok(&envelope)?;

        let data = envelope
            .get_mut("data")
            .map(Value::take)
            .filter(Value::is_object)
            .ok_or_else(|| acquisition("response did not include test data"))?;

        let summary = data.get("summary").and_then(Value::as_str).unwrap_or("-");
        tracing::debug!("Test Summary: {}", summary);
        Ok(data)
    }

    fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let endpoint_url = format!("{}/{}", self.base_url, endpoint);
        let url = reqwest::Url::parse_with_params(&endpoint_url, params)
            .map_err(|e| acquisition(format!("invalid server URL {}: {}", self.base_url, e)))?;

        let response = self.client.get(url).send().map_err(|e| {
            let hint = if self.base_url.ends_with(DEFAULT_SERVER) {
                String::new()
            } else {
                " Please check server is a valid WebPageTest server".to_string()
            };
            acquisition(format!("{}{}", e, hint))
        })?;

        if !response.status().is_success() {
            return Err(acquisition(format!(
                "HTTP {} from {}",
                response.status(),
                endpoint
            )));
        }

        response
            .json()
            .map_err(|e| acquisition(format!("invalid response from {}: {}", endpoint, e)))
    }
}

/// Prefix a bare host with `https://` and drop any trailing slash.
pub fn normalize_server(server: &str) -> String {
    let server = server.trim().trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("https://{}", server)
    }
}

fn expect_ok(envelope: &Value) -> Result<()> {
    match status_code(envelope) {
        200 => Ok(()),
        _ => Err(acquisition(status_text(envelope))),
    }
}

fn status_code(envelope: &Value) -> u64 {
    envelope
        .get("statusCode")
        .and_then(Value::as_u64)
        .unwrap_or_default()
}

fn status_text(envelope: &Value) -> String {
    envelope
        .get("statusText")
        .and_then(Value::as_str)
        .unwrap_or("unknown status")
        .to_string()
}

fn acquisition(message: impl Into<String>) -> PerflintError {
    PerflintError::Acquisition {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> WebPageTestClient {
        WebPageTestClient::new(&server.base_url(), Some("secret".to_string()))
            .unwrap()
            .with_poll_interval(Duration::from_millis(10))
    }

    #[test]
    fn normalize_server_adds_scheme() {
        assert_eq!(normalize_server("www.webpagetest.org"), "https://www.webpagetest.org");
        assert_eq!(normalize_server("http://wpt.local/"), "http://wpt.local");
        assert_eq!(normalize_server("https://wpt.example"), "https://wpt.example");
    }

    #[test]
    fn options_from_config() {
        let config = PerflintConfig {
            location: Some("Dulles:Chrome".to_string()),
            private: true,
            ..Default::default()
        };
        let options = TestOptions::from_config(&config);
        assert!(options.first_view_only);
        assert!(options.private);
        assert_eq!(options.location.as_deref(), Some("Dulles:Chrome"));

        let repeat = PerflintConfig {
            view: "repeatView".to_string(),
            ..Default::default()
        };
        assert!(!TestOptions::from_config(&repeat).first_view_only);
    }

    #[test]
    fn run_test_returns_test_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/runtest.php")
                .query_param("url", "https://example.com")
                .query_param("k", "secret")
                .query_param("f", "json")
                .query_param("fvonly", "1")
                .query_param("location", "Dulles");
            then.status(200).json_body(json!({
                "statusCode": 200,
                "statusText": "Ok",
                "data": { "testId": "170101_AB_1" }
            }));
        });

        let options = TestOptions {
            first_view_only: true,
            location: Some("Dulles".to_string()),
            ..Default::default()
        };
        let id = client(&server).run_test("https://example.com", &options).unwrap();

        assert_eq!(id, "170101_AB_1");
        mock.assert();
    }

    #[test]
    fn run_test_rejected_by_server() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/runtest.php");
            then.status(200).json_body(json!({
                "statusCode": 400,
                "statusText": "Invalid API Key"
            }));
        });

        let err = client(&server)
            .run_test("https://example.com", &TestOptions::default())
            .unwrap_err();
        assert!(matches!(err, PerflintError::Acquisition { .. }));
        assert_eq!(err.to_string(), "Test request failed - Invalid API Key");
    }

    #[test]
    fn http_failure_is_acquisition_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/jsonResult.php");
            then.status(500).body("boom");
        });

        let err = client(&server).test_results("abc").unwrap_err();
        assert!(err.to_string().contains("500"), "{}", err);
    }

    #[test]
    fn wait_returns_when_complete() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/testStatus.php").query_param("test", "abc");
            then.status(200).json_body(json!({
                "statusCode": 200,
                "statusText": "Test Complete"
            }));
        });

        let mut seen = Vec::new();
        client(&server)
            .wait_for_results("abc", Duration::from_secs(5), |s| seen.push(s.code))
            .unwrap();

        assert_eq!(seen, vec![200]);
        mock.assert_calls(1);
    }

    #[test]
    fn wait_times_out_while_pending() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/testStatus.php");
            then.status(200).json_body(json!({
                "statusCode": 101,
                "statusText": "Waiting behind 3 other tests"
            }));
        });

        let err = client(&server)
            .wait_for_results("abc", Duration::from_millis(50), |_| {})
            .unwrap_err();
        assert!(matches!(err, PerflintError::Timeout { .. }));
    }

    #[test]
    fn wait_fails_on_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/testStatus.php");
            then.status(200).json_body(json!({
                "statusCode": 404,
                "statusText": "Test not found"
            }));
        });

        let err = client(&server)
            .wait_for_results("abc", Duration::from_secs(5), |_| {})
            .unwrap_err();
        assert_eq!(err.to_string(), "Test request failed - Test not found");
    }

    #[test]
    fn test_results_returns_data() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/jsonResult.php")
                .query_param("test", "abc")
                .query_param("breakdown", "1")
                .query_param("domains", "1")
                .query_param("pagespeed", "1");
            then.status(200).json_body(json!({
                "statusCode": 200,
                "data": { "id": "abc", "summary": "https://wpt/result/abc" }
            }));
        });

        let data = client(&server).test_results("abc").unwrap();
        assert_eq!(data["id"], "abc");
        assert_eq!(data["summary"], "https://wpt/result/abc");
        mock.assert();
    }

    #[test]
    fn test_results_without_summary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/jsonResult.php");
            then.status(200)
                .json_body(json!({ "statusCode": 200, "data": { "id": "abc" } }));
        });

        let data = client(&server).test_results("abc").unwrap();
        assert!(data.get("summary").is_none());
    }
}
