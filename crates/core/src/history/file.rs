//! On-disk location of the launch history

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument};

use super::LaunchHistory;
use crate::error::{Error, Result};
use crate::models::LaunchMode;

/// File name used inside the state directory
pub const HISTORY_FILENAME: &str = "launch_history.xml";

/// The XML file a launch history is saved to between runs
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History file inside the given state directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HISTORY_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved history.
    ///
    /// A missing file is the normal first-run state and yields `Ok(None)`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<LaunchHistory>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved launch history");
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let history = LaunchHistory::restore(&text)?;
        info!(
            run_entries = history.history(LaunchMode::Run).len(),
            debug_entries = history.history(LaunchMode::Debug).len(),
            "Restored launch history"
        );
        Ok(Some(history))
    }

    /// Load the saved history, starting empty if it is absent or unreadable
    pub fn load_or_default(&self) -> LaunchHistory {
        match self.load() {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Discarding unreadable launch history");
                LaunchHistory::default()
            }
        }
    }

    /// Write the history, creating the state directory if needed
    #[instrument(skip(self, history), fields(path = %self.path.display()))]
    pub fn save(&self, history: &LaunchHistory) -> Result<()> {
        let document = history.persist()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, document)?;
        debug!("Saved launch history");
        Ok(())
    }
}
