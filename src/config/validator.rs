//! Configuration validation rules.
//!
//! - The file extension must not be empty
//! - The import must be a single `using ...;` directive

use crate::config::schema::PatchConfig;
use crate::error::{PatchError, Result};
use crate::patch::imports::is_import_line;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &PatchConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.extension.trim_start_matches('.').trim().is_empty() {
        errors.push(ValidationError {
            rule: "empty-extension".to_string(),
            message: "'extension' must not be empty".to_string(),
        });
    }

    let import = config.import.trim();
    if import.is_empty() {
        errors.push(ValidationError {
            rule: "empty-import".to_string(),
            message: "'import' must not be empty".to_string(),
        });
    } else if !is_import_line(import) || !import.ends_with(';') || import.contains('\n') {
        errors.push(ValidationError {
            rule: "invalid-import".to_string(),
            message: format!("'import' must be a using directive, got '{}'", import),
        });
    }

    if config.root.as_os_str().is_empty() {
        errors.push(ValidationError {
            rule: "empty-root".to_string(),
            message: "'root' must not be empty".to_string(),
        });
    }

    errors
}

/// Validate a configuration, failing with every message joined.
pub fn validate(config: &PatchConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PatchError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
