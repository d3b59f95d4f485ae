//! Gap closing for entity source files.
//!
//! The pipeline, applied one file at a time:
//!
//! - [`walker`] - enumerate candidate files under a root
//! - [`imports`] - ensure the marker namespace is imported
//! - [`scanner`] / [`insertion`] - locate the primary type's closing brace
//!   and splice contract templates before it
//! - [`writer`] - write back only files whose text changed
//! - [`pipeline`] - drive the above and report per-file outcomes
//!
//! No state is carried between files, so the order files are visited in
//! does not affect the result.

pub mod imports;
pub mod insertion;
pub mod outcome;
pub mod pipeline;
pub mod scanner;
pub mod walker;
pub mod writer;

pub use imports::{ImportNormalizer, ImportPolicy, DEFAULT_IMPORT};
pub use insertion::{
    splice, InsertionPoint, InsertionStrategy, LineEnding, Locator, PatternLocator,
    StructuralLocator, LEGACY_PATTERN,
};
pub use outcome::{FileOutcome, RunSummary, Transformation};
pub use pipeline::{PatchOptions, Patcher};
pub use scanner::{primary_type_body, TypeBody};
pub use walker::{TreeWalker, DEFAULT_EXTENSION, DEFAULT_ROOT};
pub use writer::{FsSourceStore, SourceStore, SourceUnit, Writer};
