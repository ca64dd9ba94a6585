//! Configuration validation.
//!
//! Checks that a merged configuration can drive a run:
//! - The output format names a registered formatter
//! - Fetching from WebPageTest needs an API key
//! - Fetching from WebPageTest needs a URL or an existing test id

use crate::config::schema::PerflintConfig;
use crate::error::{PerflintError, Result};
use crate::lint::OutputFormat;

/// Resolve the configured output format.
///
/// # Errors
///
/// Returns `UnknownFormat` when no formatter is registered under the name.
pub fn output_format(config: &PerflintConfig) -> Result<OutputFormat> {
    config.format.parse()
}

/// Validate the settings needed to acquire results from WebPageTest.
pub fn validate_for_acquisition(config: &PerflintConfig) -> Result<()> {
    if config.key.as_deref().is_none_or(str::is_empty) {
        return Err(invalid("An API key for WebPageTest must be specified."));
    }

    if config.urls.is_empty() && config.test.is_none() {
        return Err(invalid("A URL or WebPageTest test ID must be specified."));
    }

    if config.timeout == 0 {
        return Err(invalid("Timeout must be at least one second."));
    }

    Ok(())
}

fn invalid(message: &str) -> PerflintError {
    PerflintError::ConfigValidationError {
        message: message.to_string(),
    }
}
