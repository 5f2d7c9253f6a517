//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, Utc};
use rusqlite::Error as SqlError;

use crate::models::LaunchMode;

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse the JSON list of supported modes
pub fn parse_modes(s: &str) -> Result<Vec<LaunchMode>, SqlError> {
    serde_json::from_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Encode supported modes for storage
pub fn encode_modes(modes: &[LaunchMode]) -> serde_json::Result<String> {
    serde_json::to_string(modes)
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_roundtrip_format() {
        let encoded = encode_modes(&[LaunchMode::Run, LaunchMode::Debug]).unwrap();
        assert_eq!(encoded, r#"["run","debug"]"#);
        assert_eq!(
            parse_modes(&encoded).unwrap(),
            vec![LaunchMode::Run, LaunchMode::Debug]
        );
    }

    #[test]
    fn test_bad_modes_rejected() {
        assert!(parse_modes(r#"["profile"]"#).is_err());
        assert!(parse_modes("not json").is_err());
    }

    #[test]
    fn test_json_error_is_serialization_error() {
        let json_error = serde_json::from_str::<Vec<LaunchMode>>("[").unwrap_err();
        let error: crate::error::Error = json_error.into();
        assert!(matches!(error, crate::error::Error::Serialization(_)));
    }
}
