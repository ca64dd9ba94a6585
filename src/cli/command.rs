//! The lint command.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`LintCommand`] loads config, acquires measurements, lints and reports

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{
    load_config, output_format, validate_for_acquisition, FileLookupCache, PerflintConfig,
};
use crate::error::Result;
use crate::lint::{lint, page_records, ExitPolicy, ExitStatus};
use crate::service::webpagetest::{fetch_results, translate, Progress, TestInfo, WebPageTestClient};
use crate::ui::UserInterface;

use super::args::Cli;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for report output and messages
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

impl From<ExitStatus> for CommandResult {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Clean => Self::success(),
            other => Self::failure(other.code()),
        }
    }
}

/// Lints measurements for the configured pages.
pub struct LintCommand {
    cwd: PathBuf,
    args: Cli,
}

impl LintCommand {
    /// Create a new lint command that searches for config from `cwd`.
    pub fn new(cwd: &Path, args: Cli) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &Cli {
        &self.args
    }

    fn load(&self) -> Result<PerflintConfig> {
        let mut cache = FileLookupCache::new();
        let config = load_config(&mut cache, self.args.config.as_deref(), &self.cwd)?;
        tracing::debug!("Loaded config from {:?}", config.dirname);
        Ok(config.with_overrides(self.args.overrides()))
    }

    /// Run WebPageTest for every target and translate the results.
    fn acquire(&self, config: &PerflintConfig, ui: &mut dyn UserInterface) -> Result<Vec<Value>> {
        validate_for_acquisition(config)?;
        let client = WebPageTestClient::new(&config.server, config.key.clone())?;

        let mut spinner = ui.start_spinner("Running WebPageTest");
        let fetched = fetch_results(&client, config, |event| match event {
            Progress::Submitted { url, id } => {
                spinner.set_message(&format!("Testing {} (test {})", url, id))
            }
            Progress::Status { id, status } => {
                spinner.set_message(&format!("{}: {}", id, status.text))
            }
            Progress::Fetching { id } => spinner.set_message(&format!("Fetching results for {}", id)),
        });
        let raw = match fetched {
            Ok(raw) => {
                spinner.finish_success("Results received");
                raw
            }
            Err(e) => {
                spinner.finish_error("WebPageTest request failed");
                return Err(e);
            }
        };

        let theme = ui.theme();
        let mut documents = Vec::with_capacity(raw.len());
        for data in &raw {
            if config.info {
                ui.output(&TestInfo::from_results(data).render(&theme));
            }
            documents.push(translate(&config.average, &config.view, data)?);
        }
        Ok(documents)
    }
}

/// Read measurement documents saved as JSON.
///
/// A top-level array holds one document per page.
fn read_input(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Can't read input file: {}", path.display()))?;
    let input: Value = serde_json::from_str(&content)
        .with_context(|| format!("Can't parse input file: {}", path.display()))?;
    Ok(page_records(input))
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load()?;
        let format = output_format(&config)?;
        let rules = config.rule_set();
        tracing::debug!("{} rule group(s), format {}", rules.len(), format);

        let documents = match &self.args.input {
            Some(path) => read_input(path)?,
            None => self.acquire(&config, ui)?,
        };

        let report = lint(&rules, &documents);
        let output = format.renderer()(&report.results);
        if !output.is_empty() {
            ui.output(&output);
        }

        let status = ExitPolicy::new(config.max_warnings).decide(report.stats());
        if status == ExitStatus::TooManyWarnings {
            ui.error(&format!(
                "PerfLint found too many warnings (maximum: {}).",
                config.max_warnings
            ));
        }
        Ok(status.into())
    }
}
