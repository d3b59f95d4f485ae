//! Console output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`NonInteractiveUI`] writing to stdout/stderr
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use contractfill::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.message("Processed: Entities/Cliente.cs");
//! ui.success("Done! 1 files modified.");
//! assert!(ui.messages().is_empty());
//! assert!(ui.has_success("1 files modified"));
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a per-item status line.
    fn message(&mut self, msg: &str);

    /// Display a line only in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
