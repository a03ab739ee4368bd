//! Optional per-repository defaults from YAML
//!
//! ```yaml
//! pull: true
//! status: true
//! remote: upstream
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_SETTINGS_FILE: &str = ".meow.yaml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Defaults that command-line flags build on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub continue_on_error: bool,
    pub status: bool,
    pub update_submodules: bool,
    pub stash: bool,
    pub pull: bool,
    pub no_rebase: bool,
    pub diff: bool,
    pub no_push: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub remote: Option<String>,
    pub branch: Option<String>,
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load settings from a file that must exist
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| SettingsError::Parse {
            path: display,
            source,
        })
    }

    /// Load an explicit file, or the default file if it is present
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = cwd.join(DEFAULT_SETTINGS_FILE);
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}
