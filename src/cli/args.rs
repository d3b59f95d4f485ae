//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::patch::{ImportPolicy, InsertionStrategy};

/// Contractfill - Close soft-delete and archivable contract gaps in C# entities.
#[derive(Debug, Parser)]
#[command(name = "contractfill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .contractfill.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Arguments for the default `apply` command
    #[command(flatten)]
    pub apply: ApplyArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Close contract gaps under the root directory (default if no command specified)
    Apply(ApplyArgs),

    /// Report files that would change and fail if there are any
    Check(ApplyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `apply` and `check` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ApplyArgs {
    /// Directory to scan, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// File extension to process, without the dot
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// When the using directive is added
    #[arg(long, value_enum)]
    pub import_policy: Option<ImportPolicy>,

    /// How the closing brace of the entity type is found
    #[arg(long, value_enum)]
    pub strategy: Option<InsertionStrategy>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if any file would change
    #[arg(long)]
    pub check: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
