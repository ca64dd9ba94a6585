//! Configuration schema definitions for PerfLint.
//!
//! This module contains the struct that maps to the `.perflintrc` file
//! format and the command-line overrides merged on top of it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::lint::RuleSet;

/// Root configuration structure for `.perflintrc`.
///
/// Every field has a default, so an empty file is a valid (if useless)
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerflintConfig {
    /// Raw rule mapping, in file order. Normalized by [`PerflintConfig::rule_set`].
    pub rules: Map<String, Value>,

    /// Warning budget; negative disables the check.
    pub max_warnings: i64,

    /// Output format name.
    pub format: String,

    /// WebPageTest API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// WebPageTest server host or base URL.
    pub server: String,

    /// Pages to test.
    #[serde(
        rename = "URL",
        alias = "url",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub urls: Vec<String>,

    /// Existing test id to fetch instead of running a new test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Seconds to wait for a test to complete.
    pub timeout: u64,

    /// Which aggregate of the runs to lint (`median`, `average`, ...).
    pub average: String,

    /// Which view to lint (`firstView` or `repeatView`).
    pub view: String,

    /// Test agent location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Connectivity profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<String>,

    /// Label for the test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Keep the test out of the public history.
    #[serde(skip_serializing_if = "is_false")]
    pub private: bool,

    /// Print test details after acquisition.
    #[serde(skip_serializing_if = "is_false")]
    pub info: bool,

    /// Directory containing the loaded config file.
    #[serde(skip)]
    pub dirname: Option<PathBuf>,
}

impl Default for PerflintConfig {
    fn default() -> Self {
        Self {
            rules: Map::new(),
            max_warnings: -1,
            format: "stylish".to_string(),
            key: None,
            server: "www.webpagetest.org".to_string(),
            urls: Vec::new(),
            test: None,
            timeout: 120,
            average: "median".to_string(),
            view: "firstView".to_string(),
            location: None,
            connectivity: None,
            label: None,
            private: false,
            info: false,
            dirname: None,
        }
    }
}

impl PerflintConfig {
    /// Normalize the configured rules.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_config(&self.rules)
    }

    /// Merge command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        overrides.apply(&mut self);
        self
    }
}

/// Values supplied on the command line.
///
/// `None` / empty / `false` means "not given" and leaves the file value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub timeout: Option<u64>,
    pub urls: Vec<String>,
    pub test: Option<String>,
    pub key: Option<String>,
    pub format: Option<String>,
    pub max_warnings: Option<i64>,
    pub server: Option<String>,
    pub location: Option<String>,
    pub connectivity: Option<String>,
    pub label: Option<String>,
    pub private: bool,
    pub info: bool,
}

impl ConfigOverrides {
    /// Apply every given value to `config`.
    pub fn apply(self, config: &mut PerflintConfig) {
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if !self.urls.is_empty() {
            config.urls = self.urls;
        }
        if self.test.is_some() {
            config.test = self.test;
        }
        if self.key.is_some() {
            config.key = self.key;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(max_warnings) = self.max_warnings {
            config.max_warnings = max_warnings;
        }
        if let Some(server) = self.server {
            config.server = server;
        }
        if self.location.is_some() {
            config.location = self.location;
        }
        if self.connectivity.is_some() {
            config.connectivity = self.connectivity;
        }
        if self.label.is_some() {
            config.label = self.label;
        }
        config.private |= self.private;
        config.info |= self.info;
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls,
    })
}

fn is_false(b: &bool) -> bool {
    !*b
}
