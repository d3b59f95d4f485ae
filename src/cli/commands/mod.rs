//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod apply;
pub mod completions;
pub mod dispatcher;

pub use apply::ApplyCommand;
pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
