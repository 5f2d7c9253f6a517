//! Launch configuration records
//!
//! Configurations are owned by the backing store. History only ever holds
//! a [`ConfigRef`] pointing at one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LaunchMode;

/// Stable memento identifying a launch configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigRef(pub String);

impl ConfigRef {
    pub fn new(memento: impl Into<String>) -> Self {
        Self(memento.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConfigRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A launch configuration as served by the backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfiguration {
    pub memento: ConfigRef,
    pub name: String,
    /// Modes this configuration can be launched under
    pub modes: Vec<LaunchMode>,
    /// Private configurations never enter the launch history
    pub private: bool,
    /// Created implicitly rather than saved by a user
    pub transient: bool,
    pub created_at: DateTime<Utc>,
}

impl LaunchConfiguration {
    pub fn new(memento: impl Into<String>, name: impl Into<String>, modes: Vec<LaunchMode>) -> Self {
        Self {
            memento: ConfigRef::new(memento),
            name: name.into(),
            modes,
            private: false,
            transient: false,
            created_at: Utc::now(),
        }
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn memento(&self) -> &ConfigRef {
        &self.memento
    }

    pub fn supports_mode(&self, mode: LaunchMode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }
}
