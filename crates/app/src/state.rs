//! Application state

use relaunch_core::{Database, HistoryFile, Result, Settings};
use tracing::info;

/// The configuration database and the history file location
pub struct AppState {
    pub db: Database,
    pub history_file: HistoryFile,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self> {
        let state_dir = settings.state_dir()?;

        // Ensure state directory exists
        std::fs::create_dir_all(&state_dir)?;

        let db = Database::open(settings.database_path()?)?;
        let history_file = settings.history_file()?;
        info!(
            state_dir = %state_dir.display(),
            schema_version = db.schema_version(),
            "Opened relaunch state"
        );

        Ok(Self {
            db,
            history_file,
        })
    }
}
