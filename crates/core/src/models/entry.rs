//! History entries

use serde::{Deserialize, Serialize};

use super::{ConfigRef, LaunchMode};

/// One launch remembered in a history list.
///
/// The label is captured when the entry is created and is not refreshed if
/// the configuration is renamed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub configuration: ConfigRef,
    pub mode: LaunchMode,
    pub label: String,
}

impl HistoryEntry {
    pub fn new(configuration: ConfigRef, mode: LaunchMode, label: impl Into<String>) -> Self {
        Self {
            configuration,
            mode,
            label: label.into(),
        }
    }
}

/// A launch that just happened, as delivered to the history service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEvent {
    pub configuration: ConfigRef,
    pub mode: LaunchMode,
    pub label: String,
}

impl LaunchEvent {
    pub fn new(configuration: ConfigRef, mode: LaunchMode, label: impl Into<String>) -> Self {
        Self {
            configuration,
            mode,
            label: label.into(),
        }
    }
}
