//! Error types for PerfLint operations.
//!
//! This module defines [`PerflintError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Rule-level problems (bad rule shape, missing metric) never surface here;
//!   the lint engine logs them and keeps going
//! - Use `PerflintError` for failures the CLI reports to the user
//! - Use `anyhow::Error` (via `PerflintError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for PerfLint operations.
#[derive(Debug, Error)]
pub enum PerflintError {
    /// No `.perflintrc` found in the project tree or home directory.
    #[error("Can't find config file: {name}")]
    ConfigNotFound { name: String },

    /// Failed to parse configuration file.
    #[error("Can't parse config file: {path}\nError: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A metric path that cannot be resolved against any document.
    #[error("Invalid metric path '{path}': {reason}")]
    InvalidMetricPath { path: String, reason: String },

    /// A rule entry that cannot be normalized.
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Requested output format does not exist.
    #[error("Could not find formatter: {name}")]
    UnknownFormat { name: String },

    /// Measurement acquisition failed.
    #[error("Test request failed - {message}")]
    Acquisition { message: String },

    /// Measurement acquisition did not finish in time.
    #[error("Test timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for PerfLint operations.
pub type Result<T> = std::result::Result<T, PerflintError>;
