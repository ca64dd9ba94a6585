//! Configuration loading, parsing, and validation for PerfLint.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions and CLI overrides in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use perflint::config::{load_config_file, ConfigOverrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join(".perflintrc");
//! fs::write(&path, r#"{ "format": "json", "maxWarnings": 5 }"#).unwrap();
//!
//! let config = load_config_file(&path).unwrap().with_overrides(ConfigOverrides {
//!     format: Some("tap".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(config.format, "tap");
//! assert_eq!(config.max_warnings, 5);
//! ```
//!
//! # Configuration File Locations
//!
//! PerfLint uses the first `.perflintrc` it finds:
//! 1. The directory or file given with `--config`
//! 2. The current directory and each of its parents
//! 3. The user's home directory (`~/.perflintrc`)
//!
//! Command-line flags override file values, which override built-in defaults.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    find_config, load_config, load_config_file, parse_config, FileLookupCache, CONFIG_FILE_NAME,
};
pub use schema::{ConfigOverrides, PerflintConfig};
pub use validator::{output_format, validate_for_acquisition};
