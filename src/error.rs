//! Error types for contractfill operations.
//!
//! This module defines [`PatchError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Read and write failures abort the run and carry the offending path
//! - A missing root directory or a missing insertion point is not an error
//! - Use `anyhow::Error` (via `PatchError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for contractfill operations.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A source file could not be read (permissions, invalid UTF-8, ...).
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be written back.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The insertion pattern failed to compile.
    #[error("Invalid insertion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for contractfill operations.
pub type Result<T> = std::result::Result<T, PatchError>;
