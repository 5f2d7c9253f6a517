//! Launch modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The mode a configuration was launched under.
///
/// Each mode owns its own history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    Run,
    Debug,
}

impl LaunchMode {
    /// Both modes, in the order their lists are written to the history document
    pub const ALL: [LaunchMode; 2] = [LaunchMode::Debug, LaunchMode::Run];

    /// Tag used in the history document and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchMode::Run => "run",
            LaunchMode::Debug => "debug",
        }
    }

    /// The mode whose list is checked before deleting an evicted configuration
    pub fn other(&self) -> LaunchMode {
        match self {
            LaunchMode::Run => LaunchMode::Debug,
            LaunchMode::Debug => LaunchMode::Run,
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Ok(LaunchMode::Run),
            "debug" => Ok(LaunchMode::Debug),
            other => Err(Error::InvalidOperation(format!(
                "Unknown launch mode: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("run".parse::<LaunchMode>().unwrap(), LaunchMode::Run);
        assert_eq!("DEBUG".parse::<LaunchMode>().unwrap(), LaunchMode::Debug);
        assert!("profile".parse::<LaunchMode>().is_err());
    }

    #[test]
    fn test_other_mode() {
        assert_eq!(LaunchMode::Run.other(), LaunchMode::Debug);
        assert_eq!(LaunchMode::Debug.other(), LaunchMode::Run);
    }
}
