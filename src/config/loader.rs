//! Configuration file discovery and loading.

use crate::config::schema::PatchConfig;
use crate::config::validator::validate;
use crate::error::{PatchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the project config.
pub const CONFIG_FILE_NAME: &str = ".contractfill.yml";

/// Where settings are read from.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Path given with `--config`; must exist.
    pub explicit: Option<PathBuf>,

    /// Project config: `.contractfill.yml` in the project root.
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(|p| resolve(project_root, p)),
            project: Self::find_project_config(project_root),
        }
    }

    /// Find the project config at `.contractfill.yml`.
    fn find_project_config(project_root: &Path) -> Option<PathBuf> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// The file that will be loaded. An explicit path wins over discovery.
    pub fn selected(&self) -> Option<&PathBuf> {
        self.explicit.as_ref().or(self.project.as_ref())
    }
}

/// Resolve `path` against `project_root` unless it is absolute.
pub fn resolve(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PatchConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PatchError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PatchError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`PatchConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PatchConfig> {
    if content.trim().is_empty() {
        return Ok(PatchConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PatchError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate the settings for a project.
///
/// Uses `explicit` when given, `.contractfill.yml` in the project root when
/// present, and the built-in defaults otherwise.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<PatchConfig> {
    let paths = ConfigPaths::discover(project_root, explicit);

    let config = match paths.selected() {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(path)?
        }
        None => {
            debug!("No config file in {}, using defaults", project_root.display());
            PatchConfig::default()
        }
    };

    validate(&config)?;
    Ok(config)
}
