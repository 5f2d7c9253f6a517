//! Settings file
//!
//! Optional `relaunch.toml` in the platform config directory:
//!
//! ```toml
//! state_dir = "/var/lib/relaunch"
//! history_file = "launch_history.xml"
//! database_file = "relaunch.db"
//! log_filter = "relaunch=debug"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::history::{HistoryFile, HISTORY_FILENAME};

/// Name of the settings file inside the config directory
pub const SETTINGS_FILENAME: &str = "relaunch.toml";

/// Platform directories for relaunch
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "relaunch", "relaunch").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the history document and database.
    /// Defaults to the platform data directory.
    pub state_dir: Option<PathBuf>,
    /// History document file name
    pub history_file: String,
    /// Launch configuration database file name
    pub database_file: String,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: None,
            history_file: HISTORY_FILENAME.to_string(),
            database_file: "relaunch.db".to_string(),
            log_filter: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load settings from the platform config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&project_dirs()?.config_dir().join(SETTINGS_FILENAME))
    }

    /// Resolved state directory
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    pub fn history_file(&self) -> Result<HistoryFile> {
        Ok(HistoryFile::new(self.state_dir()?.join(&self.history_file)))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join(&self.database_file))
    }
}
