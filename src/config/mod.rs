//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use contractfill::config::load_config;
//! use contractfill::patch::InsertionStrategy;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".contractfill.yml"), "strategy: pattern").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.strategy, InsertionStrategy::Pattern);
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the config file (`--config`, or
//! `.contractfill.yml` in the project root), then command-line flags.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, parse_config, resolve, ConfigPaths, CONFIG_FILE_NAME,
};
pub use schema::PatchConfig;
pub use validator::{validate, validate_config, ValidationError};
