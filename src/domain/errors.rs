//! Domain error types
//!
//! This module defines the error hierarchy for the CARD:Live data core.
//! All errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main CARD:Live error type
///
/// This is the primary error type used throughout the crate. Loading, selection
/// and configuration failures all surface through it synchronously to the caller.
#[derive(Debug, Error)]
pub enum CardLiveError {
    /// The input directory does not exist
    #[error("Data directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A sample file is not valid JSON or lacks required fields
    #[error("Malformed record in {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    /// Unknown resistance-index selector name
    #[error("Unsupported selector: by={0}")]
    UnsupportedSelector(String),

    /// Unknown table/selector combination on a dataset
    #[error("Unknown selector: table={table}, by={by}")]
    UnknownSelector { table: String, by: String },

    /// Tables of a dataset do not share the same key space
    #[error("Inconsistent dataset: {0}")]
    InconsistentDataset(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CardLiveError {
    /// Builds a [`CardLiveError::MalformedRecord`] for the given file
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from reading the input data rather than from
    /// configuration or API misuse
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound(_)
                | Self::MalformedRecord { .. }
                | Self::InconsistentDataset(_)
                | Self::Io(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CardLiveError {
    fn from(err: std::io::Error) -> Self {
        CardLiveError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CardLiveError {
    fn from(err: serde_json::Error) -> Self {
        CardLiveError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CardLiveError {
    fn from(err: toml::de::Error) -> Self {
        CardLiveError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_display() {
        let err = CardLiveError::DirectoryNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data directory not found: /missing/dir");
    }

    #[test]
    fn test_malformed_record_builder() {
        let err = CardLiveError::malformed("sample1.json", "missing timestamp");
        assert_eq!(
            err.to_string(),
            "Malformed record in sample1.json: missing timestamp"
        );
        assert!(err.is_data_error());
    }

    #[test]
    fn test_selector_errors_are_not_data_errors() {
        let err = CardLiveError::UnsupportedSelector("colour".to_string());
        assert!(!err.is_data_error());

        let err = CardLiveError::UnknownSelector {
            table: "main".to_string(),
            by: "geo".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown selector: table=main, by=geo");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CardLiveError = io_err.into();
        assert!(matches!(err, CardLiveError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CardLiveError = json_err.into();
        assert!(matches!(err, CardLiveError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CardLiveError = toml_err.into();
        assert!(matches!(err, CardLiveError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CardLiveError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
