//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// PerfLint - Lint web page performance measurements against a rule set.
#[derive(Debug, Default, Parser)]
#[command(name = "perflint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file, or directory to start searching for .perflintrc from
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds to wait for a test to complete
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// URL to test (repeatable)
    #[arg(short, long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Existing WebPageTest test id to lint instead of running a new test
    #[arg(long, value_name = "ID")]
    pub test: Option<String>,

    /// WebPageTest API key
    #[arg(short, long, env = "PERFLINT_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Output format (stylish, json, junit, tap)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Number of warnings that fails the run (-1 disables the check)
    #[arg(short = 'w', long, allow_negative_numbers = true, value_name = "N")]
    pub max_warnings: Option<i64>,

    /// WebPageTest server
    #[arg(short, long, env = "PERFLINT_SERVER")]
    pub server: Option<String>,

    /// Print test details before the report
    #[arg(short, long)]
    pub info: bool,

    /// Lint measurement documents from a JSON file instead of running tests
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// WebPageTest test location
    #[arg(long)]
    pub location: Option<String>,

    /// WebPageTest connectivity profile
    #[arg(long)]
    pub connectivity: Option<String>,

    /// Label for the WebPageTest run
    #[arg(long)]
    pub label: Option<String>,

    /// Keep the test out of the public WebPageTest history
    #[arg(long)]
    pub private: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The configuration values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            timeout: self.timeout,
            urls: self.urls.clone(),
            test: self.test.clone(),
            key: self.key.clone(),
            format: self.format.clone(),
            max_warnings: self.max_warnings,
            server: self.server.clone(),
            location: self.location.clone(),
            connectivity: self.connectivity.clone(),
            label: self.label.clone(),
            private: self.private,
            info: self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_urls() {
        let cli =
            Cli::try_parse_from(["perflint", "-u", "https://a.example", "--url", "https://b.example"])
                .unwrap();
        assert_eq!(cli.urls, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn parses_negative_max_warnings() {
        let cli = Cli::try_parse_from(["perflint", "--max-warnings", "-1"]).unwrap();
        assert_eq!(cli.max_warnings, Some(-1));

        let cli = Cli::try_parse_from(["perflint", "-w", "3"]).unwrap();
        assert_eq!(cli.max_warnings, Some(3));
    }

    #[test]
    fn parses_input_and_format() {
        let cli = Cli::try_parse_from(["perflint", "--input", "results.json", "-f", "tap"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("results.json")));
        assert_eq!(cli.format.as_deref(), Some("tap"));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["perflint", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn overrides_carry_flags() {
        let cli = Cli::try_parse_from([
            "perflint",
            "--test",
            "170101_AB_1",
            "--private",
            "-i",
            "--location",
            "Dulles:Chrome",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.test.as_deref(), Some("170101_AB_1"));
        assert!(overrides.private);
        assert!(overrides.info);
        assert_eq!(overrides.location.as_deref(), Some("Dulles:Chrome"));
        assert!(overrides.urls.is_empty());
        assert_eq!(overrides.format, None);
    }
}
