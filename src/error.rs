//! Error types for expense-tracker
//!
//! Storage, services and the CLI return `TrackerError`. The aggregation engine
//! never does: a record it cannot use becomes a data-quality count instead.

use thiserror::Error;

/// The main error type for expense-tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Bad or unreadable config.json
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input (title, amount, date, owner)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing record, or a record belonging to another owner
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Document file shape or document store invariants
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing a report or export failed
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    /// Record lookups that fail, including ones scoped away by owner
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense-tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = TrackerError::Validation("Title cannot be empty".into());
        assert_eq!(err.to_string(), "Validation error: Title cannot be empty");
        assert!(err.is_validation());

        let err = TrackerError::Storage("Duplicate document id: t1".into());
        assert_eq!(err.to_string(), "Storage error: Duplicate document id: t1");
    }

    #[test]
    fn test_record_not_found() {
        let err = TrackerError::record_not_found("t5");
        assert_eq!(err.to_string(), "Transaction not found: t5");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(matches!(TrackerError::from(io), TrackerError::Io(_)));

        let json = serde_json::from_str::<serde_json::Value>("{\"documents\": [").unwrap_err();
        assert!(matches!(TrackerError::from(json), TrackerError::Json(_)));

        let yaml = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        assert!(matches!(TrackerError::from(yaml), TrackerError::Export(_)));
    }
}
