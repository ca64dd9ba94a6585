//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::PerflintTheme;
use super::SpinnerHandle;

/// A spinner shown on stderr while waiting on a remote test.
///
/// indicatif hides the spinner when stderr is not a terminal, so piped and
/// CI runs stay clean.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: PerflintTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: PerflintTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.blue} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: PerflintTheme::plain(),
        }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar
            .set_message(self.theme.progress.apply_to(msg).to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        tracing::debug!("{}", msg);
        self.bar.finish_and_clear();
    }

    fn finish_error(&mut self, msg: &str) {
        self.bar.abandon_with_message(self.theme.format_failure(msg));
    }
}
