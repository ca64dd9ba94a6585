//! Visual theme and styling.

use console::Style;

/// PerfLint's visual theme.
#[derive(Debug, Clone)]
pub struct PerflintTheme {
    /// Style for the `error` severity label (red).
    pub error: Style,
    /// Style for the `warning` severity label (yellow).
    pub warning: Style,
    /// Style for dim/secondary text such as rule ids and field labels.
    pub dim: Style,
    /// Style for page and section headings (underlined).
    pub heading: Style,
    /// Style for highlighted values (yellow bold).
    pub value: Style,
    /// Summary line when any error was reported (red bold).
    pub summary_error: Style,
    /// Summary line when only warnings were reported (yellow bold).
    pub summary_warning: Style,
    /// Style for progress spinners (blue bold).
    pub progress: Style,
    /// Style for user-facing failure messages (red bold).
    pub failure: Style,
}

impl Default for PerflintTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PerflintTheme {
    /// Create the default PerfLint theme.
    pub fn new() -> Self {
        Self {
            error: Style::new().red(),
            warning: Style::new().yellow(),
            dim: Style::new().dim(),
            heading: Style::new().underlined(),
            value: Style::new().yellow().bold(),
            summary_error: Style::new().red().bold(),
            summary_warning: Style::new().yellow().bold(),
            progress: Style::new().blue().bold(),
            failure: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            error: Style::new(),
            warning: Style::new(),
            dim: Style::new(),
            heading: Style::new(),
            value: Style::new(),
            summary_error: Style::new(),
            summary_warning: Style::new(),
            progress: Style::new(),
            failure: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a user-facing failure message.
    pub fn format_failure(&self, msg: &str) -> String {
        format!("{}", self.failure.apply_to(msg))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.summary_warning.apply_to(msg))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
