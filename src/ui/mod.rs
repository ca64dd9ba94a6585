//! Console output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//! - [`PerflintTheme`] styles and spinners
//!
//! Rendered reports go to stdout; failures, warnings and progress go to
//! stderr so report output stays machine-readable.
//!
//! # Example
//!
//! ```
//! use perflint::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.output("TAP version 13\n");
//! ui.error("Could not find formatter: xml");
//!
//! assert_eq!(ui.outputs(), ["TAP version 13\n"]);
//! assert!(ui.has_error("Could not find formatter"));
//! ```

pub mod mock;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PerflintTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display an informational message on its own line.
    fn message(&mut self, msg: &str);

    /// Write rendered report text to stdout exactly as given.
    fn output(&mut self, text: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for a long-running operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// The theme used for styled output.
    fn theme(&self) -> PerflintTheme;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
