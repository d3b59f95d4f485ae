//! Per-file and per-run reports.

use std::path::PathBuf;

use serde::Serialize;

use crate::contract::ContractKind;

/// What happened to one file's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transformation {
    /// Final text.
    #[serde(skip)]
    pub text: String,
    /// Contracts whose block was inserted, in insertion order.
    pub inserted: Vec<ContractKind>,
    /// Contracts with a gap but no insertion point.
    pub skipped: Vec<ContractKind>,
    /// Whether the `using` directive was added.
    pub import_added: bool,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// File processed.
    pub path: PathBuf,
    /// Whether the file's text changed (and was written, unless dry run).
    pub changed: bool,
    /// Details of the transformation.
    #[serde(flatten)]
    pub transformation: Transformation,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Root directory walked.
    pub root: PathBuf,
    /// The root directory did not exist; nothing was done.
    pub root_missing: bool,
    /// Nothing was written.
    pub dry_run: bool,
    /// Files visited.
    pub files_scanned: usize,
    /// Files that changed or had a gap that could not be closed.
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    /// Files whose text changed.
    pub fn modified(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.changed)
    }

    /// Number of modified files.
    pub fn modified_count(&self) -> usize {
        self.modified().count()
    }

    /// Whether any file changed.
    pub fn has_changes(&self) -> bool {
        self.outcomes.iter().any(|outcome| outcome.changed)
    }

    /// Files where a gap could not be closed.
    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.transformation.skipped.is_empty())
    }
}
