//! SQLite storage layer for relaunch

mod configurations;
mod migrations;
mod parse;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::models::{ConfigRef, LaunchConfiguration};

pub use configurations::ConfigurationRepo;
pub use traits::ConfigurationStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get launch configuration store
    pub fn configurations(&self) -> ConfigurationRepo<'_> {
        ConfigurationRepo::new(&self.conn)
    }
}

impl ConfigurationStore for Database {
    fn resolve(&self, reference: &ConfigRef) -> Result<Option<LaunchConfiguration>> {
        self.configurations().get(reference)
    }

    fn delete(&self, configuration: &LaunchConfiguration) -> Result<()> {
        if !self.configurations().delete(configuration.memento())? {
            warn!(memento = %configuration.memento, "Configuration already gone");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LaunchMode;

    #[test]
    fn test_schema_version() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version(), 2);
    }

    #[test]
    fn test_store_resolve_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let config = LaunchConfiguration::new("x", "X", vec![LaunchMode::Debug]);
        db.configurations().save(&config).unwrap();

        let resolved = db.resolve(config.memento()).unwrap().unwrap();
        assert!(resolved.supports_mode(LaunchMode::Debug));
        assert!(!resolved.supports_mode(LaunchMode::Run));

        ConfigurationStore::delete(&db, &resolved).unwrap();
        assert!(db.resolve(config.memento()).unwrap().is_none());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relaunch.db");
        {
            let db = Database::open(&path).unwrap();
            db.configurations()
                .save(&LaunchConfiguration::new("keep", "Keep", vec![LaunchMode::Run]))
                .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert!(db.resolve(&ConfigRef::from("keep")).unwrap().is_some());
    }
}
