//! Configuration file discovery and loading.
//!
//! PerfLint reads a single `.perflintrc` file. Discovery walks up from the
//! start directory to the filesystem root, then falls back to the user's
//! home directory. Directory lookups go through a [`FileLookupCache`] owned
//! by the caller, so one invocation never probes the same path twice.

use crate::config::schema::PerflintConfig;
use crate::error::{PerflintError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".perflintrc";

/// Memoized results of upward file searches.
///
/// Keyed by the candidate path probed; the value is the file eventually found
/// from that point (or `None` when the walk reached the root).
#[derive(Debug, Default)]
pub struct FileLookupCache {
    results: HashMap<PathBuf, Option<PathBuf>>,
}

impl FileLookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for `name` in `start` and each of its ancestors.
    pub fn find_file(&mut self, name: &str, start: &Path) -> Option<PathBuf> {
        let mut probed = Vec::new();
        let mut found = None;

        for dir in start.ancestors() {
            let candidate = dir.join(name);
            if let Some(hit) = self.results.get(&candidate) {
                found = hit.clone();
                break;
            }
            if candidate.exists() {
                found = Some(candidate.clone());
                probed.push(candidate);
                break;
            }
            probed.push(candidate);
        }

        for candidate in probed {
            self.results.insert(candidate, found.clone());
        }
        found
    }

    /// Number of memoized lookups.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Find the configuration file for a project.
///
/// Looks for `.perflintrc` from `start` upward, then in `home`.
pub fn find_config(cache: &mut FileLookupCache, start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    tracing::debug!("Finding config from {}", start.display());
    if let Some(project) = cache.find_file(CONFIG_FILE_NAME, start) {
        return Some(project);
    }

    let home = home?.join(CONFIG_FILE_NAME);
    home.is_file().then_some(home)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the content is neither valid JSON nor YAML.
pub fn load_config_file(path: &Path) -> Result<PerflintConfig> {
    tracing::debug!("Parsing config: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PerflintError::ConfigNotFound {
                name: path.display().to_string(),
            }
        } else {
            PerflintError::Io(e)
        }
    })?;

    let mut config = parse_config(&content, path)?;
    config.dirname = path.parent().map(Path::to_path_buf);
    Ok(config)
}

/// Parse config content.
///
/// Content starting with `{` is parsed as JSON, anything else as YAML.
///
/// # Arguments
///
/// * `content` - The file content
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PerflintConfig> {
    let parse_error = |message: String| PerflintError::ConfigParseError {
        path: source_path.to_path_buf(),
        message,
    };

    if content.trim_start().starts_with('{') {
        serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
    }
}

/// Load the configuration for this invocation.
///
/// `config_arg` may name a config file directly or a directory to start the
/// search from; without it the search starts at `cwd`.
///
/// # Errors
///
/// Returns `ConfigNotFound` when no file is found.
pub fn load_config(
    cache: &mut FileLookupCache,
    config_arg: Option<&Path>,
    cwd: &Path,
) -> Result<PerflintConfig> {
    let path = match config_arg {
        Some(path) if path.is_file() => Some(path.to_path_buf()),
        Some(dir) if dir.is_dir() => find_config(cache, dir, dirs::home_dir().as_deref()),
        Some(missing) => {
            return Err(PerflintError::ConfigNotFound {
                name: missing.display().to_string(),
            })
        }
        None => find_config(cache, cwd, dirs::home_dir().as_deref()),
    };

    let path = path.ok_or_else(|| PerflintError::ConfigNotFound {
        name: CONFIG_FILE_NAME.to_string(),
    })?;
    load_config_file(&path)
}
