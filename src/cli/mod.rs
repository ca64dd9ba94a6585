//! Command-line interface for PerfLint.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`command`] - The lint command

pub mod args;
pub mod command;

pub use args::Cli;
pub use command::{Command, CommandResult, LintCommand};
