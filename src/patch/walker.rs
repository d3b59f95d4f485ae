//! Source tree enumeration.

use std::ffi::OsStr;
use std::path::PathBuf;

use walkdir::WalkDir;

/// Default directory scanned, relative to the project root.
pub const DEFAULT_ROOT: &str = "CoreApp.Domain/Entities";

/// Default extension of candidate files.
pub const DEFAULT_EXTENSION: &str = "cs";

/// Recursively enumerates files with a given extension under a root.
///
/// A missing root is not an error: the walk is simply empty, and callers
/// check [`TreeWalker::root_exists`] to report it.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    extension: String,
}

impl TreeWalker {
    /// Create a walker. A leading dot on `extension` is ignored.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Whether the root exists at all.
    pub fn root_exists(&self) -> bool {
        self.root.exists()
    }

    /// Lazily walk the tree, yielding matching files sorted by name within
    /// each directory. Each call starts a fresh walk.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let walk = self
            .root
            .is_dir()
            .then(|| WalkDir::new(&self.root).sort_by_file_name().into_iter());

        walk.into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension() == Some(OsStr::new(&self.extension)))
            .map(|entry| entry.into_path())
    }
}
