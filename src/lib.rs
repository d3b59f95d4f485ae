//! Contractfill - closes marker-interface gaps in C# entity sources.
//!
//! Entity classes that declare `ISoftDeletableEntity` or `IArchivableEntity`
//! without the members those interfaces require get a fixed member block
//! inserted before the closing brace of the type, plus the `using` directive
//! for the interfaces' namespace. Files that need nothing are never written.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`contract`] - The marker contracts and their member templates
//! - [`error`] - Error types and result aliases
//! - [`patch`] - Tree walking, insertion, import normalization and writing
//! - [`ui`] - Console output
//!
//! # Example
//!
//! ```
//! use contractfill::patch::{PatchOptions, Patcher};
//!
//! let patcher = Patcher::new(PatchOptions::default());
//! let result = patcher
//!     .transform("public class Lote : IArchivableEntity\n{\n}\n")
//!     .unwrap();
//!
//! assert!(result.text.contains("public DateTime UltimaMovimentacao"));
//! assert!(result.text.starts_with("using CoreApp.Domain.Entities.Common;\n"));
//! ```

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod patch;
pub mod ui;

pub use error::{PatchError, Result};
