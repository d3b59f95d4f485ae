//! Apply command implementation.
//!
//! `contractfill apply` (the default command) walks the entity root and
//! closes every contract gap it finds. With `--dry-run` or `--check` it only
//! reports what would change.

use std::path::{Path, PathBuf};

use crate::cli::args::ApplyArgs;
use crate::config::{load_config, resolve, PatchConfig};
use crate::error::{PatchError, Result};
use crate::patch::{Patcher, RunSummary};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The apply command implementation.
pub struct ApplyCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ApplyArgs,
}

impl ApplyCommand {
    /// Create a new apply command.
    pub fn new(project_root: &Path, args: ApplyArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Use an explicit config file.
    pub fn with_config(mut self, path: Option<&Path>) -> Self {
        self.config_path = path.map(Path::to_path_buf);
        self
    }

    /// Config file settings with command-line flags layered on top.
    pub fn settings(&self) -> Result<PatchConfig> {
        let mut config = load_config(&self.project_root, self.config_path.as_deref())?;

        if let Some(root) = &self.args.root {
            config.root = root.clone();
        }
        if let Some(extension) = &self.args.extension {
            config.extension = extension.clone();
        }
        if let Some(policy) = self.args.import_policy {
            config.import_policy = policy;
        }
        if let Some(strategy) = self.args.strategy {
            config.strategy = strategy;
        }

        crate::config::validate(&config)?;
        Ok(config)
    }

    fn is_dry_run(&self) -> bool {
        self.args.dry_run || self.args.check
    }

    fn report(&self, summary: &RunSummary, ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let json =
                serde_json::to_string_pretty(summary).map_err(|e| PatchError::Other(e.into()))?;
            ui.message(&json);
            return Ok(());
        }

        if summary.root_missing {
            ui.warning(&format!("Directory {} not found", summary.root.display()));
            return Ok(());
        }

        let count = summary.modified_count();
        if summary.dry_run {
            ui.success(&format!("Done! {} files would be modified.", count));
        } else {
            ui.success(&format!("Done! {} files modified.", count));
        }
        Ok(())
    }
}

impl Command for ApplyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.settings() {
            Ok(c) => c,
            Err(
                e @ (PatchError::ConfigNotFound { .. }
                | PatchError::ConfigParseError { .. }
                | PatchError::ConfigValidationError { .. }),
            ) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        // Apply config default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            if let Some(mode) = config.default_output {
                ui.set_output_mode(mode);
            }
        }

        let root = resolve(&self.project_root, &config.root);
        let mut patcher = Patcher::new(config.patch_options(self.is_dry_run()));

        // Per-file lines would interleave with the JSON document
        let mode = ui.output_mode();
        if self.args.json {
            ui.set_output_mode(OutputMode::Silent);
        }
        let summary = patcher.run(&root, ui);
        ui.set_output_mode(mode);
        let summary = summary?;

        self.report(&summary, ui)?;

        if self.args.check && summary.has_changes() {
            ui.error(&format!(
                "{} files are missing contract members",
                summary.modified_count()
            ));
            return Ok(CommandResult::failure(1));
        }

        Ok(CommandResult::success())
    }
}
