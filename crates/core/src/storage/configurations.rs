//! Launch configuration storage
//!
//! Backing store for the configurations the launch history points at.

use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::Result;
use crate::models::{ConfigRef, LaunchConfiguration};
use crate::storage::parse::{encode_modes, parse_datetime, parse_modes, OptionalExt};

/// Launch configuration store
pub struct ConfigurationRepo<'a> {
    conn: &'a Connection,
}

const SELECT_COLUMNS: &str =
    "SELECT memento, name, modes, private, transient, created_at FROM launch_configurations";

fn row_to_configuration(row: &Row<'_>) -> rusqlite::Result<LaunchConfiguration> {
    let memento: String = row.get(0)?;
    let modes: String = row.get(2)?;
    let created_at: String = row.get(5)?;

    Ok(LaunchConfiguration {
        memento: ConfigRef(memento),
        name: row.get(1)?,
        modes: parse_modes(&modes)?,
        private: row.get(3)?,
        transient: row.get(4)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl<'a> ConfigurationRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add or replace a configuration
    pub fn save(&self, configuration: &LaunchConfiguration) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO launch_configurations
                 (memento, name, modes, private, transient, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                configuration.memento.as_str(),
                configuration.name,
                encode_modes(&configuration.modes)?,
                configuration.private,
                configuration.transient,
                configuration.created_at.to_rfc3339(),
            ],
        )?;
        debug!(memento = %configuration.memento, "Saved launch configuration");
        Ok(())
    }

    /// Get a configuration by memento
    pub fn get(&self, memento: &ConfigRef) -> Result<Option<LaunchConfiguration>> {
        let result = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE memento = ?1"),
                params![memento.as_str()],
                row_to_configuration,
            )
            .optional()?;
        Ok(result)
    }

    /// List all configurations, oldest first
    pub fn list(&self) -> Result<Vec<LaunchConfiguration>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at, memento"))?;
        let rows = stmt.query_map([], row_to_configuration)?;

        let mut configurations = Vec::new();
        for row in rows {
            configurations.push(row?);
        }
        Ok(configurations)
    }

    /// Rename a configuration, returning whether it existed
    pub fn rename(&self, memento: &ConfigRef, name: &str) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE launch_configurations SET name = ?2 WHERE memento = ?1",
            params![memento.as_str(), name],
        )?;
        debug!(memento = %memento, renamed = rows > 0, "Renamed launch configuration");
        Ok(rows > 0)
    }

    /// Remove a configuration, returning whether it existed
    pub fn delete(&self, memento: &ConfigRef) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM launch_configurations WHERE memento = ?1",
            params![memento.as_str()],
        )?;
        debug!(memento = %memento, removed = rows > 0, "Deleted launch configuration");
        Ok(rows > 0)
    }
}
