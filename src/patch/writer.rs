//! Change-only persistence of source files.
//!
//! Files are read whole, mutated in memory, and written back whole only when
//! the final text differs from what was read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PatchError, Result};

/// Text of one file being processed.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Location of the file.
    pub path: PathBuf,
    /// Text as read.
    original: String,
    /// Text after transformation.
    pub text: String,
}

impl SourceUnit {
    /// Wrap freshly read text.
    pub fn new(path: impl Into<PathBuf>, text: String) -> Self {
        Self {
            path: path.into(),
            original: text.clone(),
            text,
        }
    }

    /// Text as it was read.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether the text differs from what was read.
    pub fn is_changed(&self) -> bool {
        self.text != self.original
    }
}

/// Storage the patcher reads from and writes to.
pub trait SourceStore {
    /// Read a whole file as UTF-8.
    fn read(&self, path: &Path) -> Result<String>;

    /// Overwrite a whole file.
    fn write(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// [`SourceStore`] backed by the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceStore;

impl SourceStore for FsSourceStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| PatchError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).map_err(|source| PatchError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Writes units back only when they changed.
pub struct Writer {
    store: Box<dyn SourceStore>,
    dry_run: bool,
}

impl Writer {
    /// Create a writer over `store`. In dry-run mode nothing is written.
    pub fn new(store: Box<dyn SourceStore>, dry_run: bool) -> Self {
        Self { store, dry_run }
    }

    /// Read a file into a fresh unit.
    pub fn load(&self, path: &Path) -> Result<SourceUnit> {
        let text = self.store.read(path)?;
        Ok(SourceUnit::new(path, text))
    }

    /// Persist the unit if it changed. Returns whether it changed.
    pub fn persist(&mut self, unit: &SourceUnit) -> Result<bool> {
        if !unit.is_changed() {
            return Ok(false);
        }
        if self.dry_run {
            tracing::debug!("Dry run, not writing {}", unit.path.display());
        } else {
            self.store.write(&unit.path, &unit.text)?;
        }
        Ok(true)
    }

    /// Whether this writer skips writes.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
