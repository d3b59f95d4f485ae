//! Configuration schema for `.contractfill.yml`.
//!
//! Every field is optional in the file; missing fields take the built-in
//! defaults.
//!
//! ```yaml
//! root: CoreApp.Domain/Entities
//! extension: cs
//! import: "using CoreApp.Domain.Entities.Common;"
//! import_policy: atomic
//! strategy: structural
//! default_output: normal
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::patch::{
    ImportPolicy, InsertionStrategy, PatchOptions, DEFAULT_EXTENSION, DEFAULT_IMPORT,
    DEFAULT_ROOT,
};
use crate::ui::OutputMode;

/// Project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Directory walked, relative to the project root.
    pub root: PathBuf,

    /// Extension of candidate files, without the dot.
    pub extension: String,

    /// Directive added to files referencing a marker interface.
    pub import: String,

    /// When the directive is added.
    pub import_policy: ImportPolicy,

    /// How the closing brace of the primary type is found.
    pub strategy: InsertionStrategy,

    /// Output mode used when no `-v`/`-q` flag is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output: Option<OutputMode>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extension: DEFAULT_EXTENSION.to_string(),
            import: DEFAULT_IMPORT.to_string(),
            import_policy: ImportPolicy::default(),
            strategy: InsertionStrategy::default(),
            default_output: None,
        }
    }
}

impl PatchConfig {
    /// Patch options for a run, with `dry_run` as given.
    pub fn patch_options(&self, dry_run: bool) -> PatchOptions {
        PatchOptions {
            extension: self.extension.trim_start_matches('.').to_string(),
            import: self.import.trim().to_string(),
            import_policy: self.import_policy,
            strategy: self.strategy,
            dry_run,
        }
    }
}
