//! Configuration types and parsing for riser.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "riser.yml";

/// Main project configuration from riser.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Default connection string for the target database
    pub connection: String,

    /// Database role granted to the application (created if absent)
    #[serde(default = "default_role")]
    pub role: String,

    /// Login / principal to place in the role (e.g. a deployment group)
    #[serde(default)]
    pub login_group: Option<String>,

    /// Whether the provisioning step runs at all
    #[serde(default)]
    pub deploy_permissions: bool,

    /// Directories containing SQL scripts, relative to the project root
    #[serde(default = "default_script_paths")]
    pub script_paths: Vec<String>,

    /// Directory where pre-upgrade backups are written
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_role() -> String {
    "riser_admin".to_string()
}

fn default_script_paths() -> Vec<String> {
    vec!["scripts".to_string()]
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {e}", path.display()),
        })?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            message: e.to_string(),
        })
    }

    /// Load `riser.yml` from a project directory
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(CONFIG_FILE))
    }

    /// Script directories resolved against the project root
    pub fn script_paths_absolute(&self, root: &Path) -> Vec<PathBuf> {
        self.script_paths.iter().map(|p| root.join(p)).collect()
    }

    /// Backup directory resolved against the project root
    pub fn backup_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.backup_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
