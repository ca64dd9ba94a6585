//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{PerflintTheme, ProgressSpinner, SpinnerHandle, UserInterface};

/// Terminal UI implementation.
///
/// Reports are written to stdout; everything else goes to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PerflintTheme,
    show_progress: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let err = Term::stderr();
        Self {
            out: Term::stdout(),
            show_progress: err.is_term(),
            err,
            theme: PerflintTheme::detect(),
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "\n{}", self.theme.format_failure(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.show_progress {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn theme(&self) -> PerflintTheme {
        self.theme.clone()
    }
}
