//! Error types for relaunch core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The persisted history document could not be understood
    #[error("Malformed history document: {0}")]
    Parse(String),

    /// The history document could not be produced
    #[error("Document error: {0}")]
    Document(String),

    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("History service has stopped")]
    ServiceStopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
