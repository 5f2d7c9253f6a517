//! relaunch core library
//!
//! Run and debug launch histories, their XML persistence, the launch
//! configuration store they point into, and the single-writer service that
//! owns them at runtime.

pub mod error;
pub mod history;
pub mod invariants;
pub mod models;
pub mod service;
pub mod settings;
pub mod storage;

pub use error::{Error, Result};
pub use history::{HistoryFile, HistoryList, LaunchHistory, HISTORY_FILENAME, MAX_HISTORY_SIZE};
pub use models::*;
pub use service::{HistoryHandle, HistoryService};
pub use settings::Settings;
pub use storage::{ConfigurationRepo, ConfigurationStore, Database};
