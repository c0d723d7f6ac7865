//! Error types for Bibliosynth
//!
//! Provides a single error taxonomy shared by every pipeline stage:
//! - Distinct variants for each failure mode
//! - Coarse error kinds (configuration, data integrity, I/O)
//! - Machine-readable error codes
//! - Process exit code mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Configuration errors (1xxx)
    ConfigurationError,
    InvalidParameter,

    // Data integrity errors (2xxx)
    DataIntegrityError,
    UnknownResearcher,
    DuplicateIdentifier,
    NegativeCitations,

    // I/O errors (3xxx)
    IoError,
    CsvError,
    SerializationError,
    RenderError,

    // Internal errors (9xxx)
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ConfigurationError => 1001,
            ErrorCode::InvalidParameter => 1002,

            ErrorCode::DataIntegrityError => 2001,
            ErrorCode::UnknownResearcher => 2002,
            ErrorCode::DuplicateIdentifier => 2003,
            ErrorCode::NegativeCitations => 2004,

            ErrorCode::IoError => 3001,
            ErrorCode::CsvError => 3002,
            ErrorCode::SerializationError => 3003,
            ErrorCode::RenderError => 3004,

            ErrorCode::InternalError => 9001,
        }
    }
}

/// Coarse error classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid generation parameters or catalogs
    Configuration,
    /// The corpus violates one of its invariants
    DataIntegrity,
    /// Reading or writing an artifact failed
    Io,
    /// Unexpected failure outside the other categories
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration error"),
            ErrorKind::DataIntegrity => write!(f, "data integrity error"),
            ErrorKind::Io => write!(f, "I/O error"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    // Data integrity errors
    #[error("Data integrity violation: {message}")]
    DataIntegrity { message: String },

    #[error("Publication {publication_id} references unknown researcher {researcher_id}")]
    UnknownResearcher {
        publication_id: String,
        researcher_id: String,
    },

    #[error("Duplicate {entity} identifier: {id}")]
    DuplicateIdentifier { entity: &'static str, id: String },

    #[error("Publication {publication_id} has negative citation count {value}")]
    NegativeCitations { publication_id: String, value: i64 },

    // I/O errors
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Chart rendering failed for {chart}: {message}")]
    Render { chart: String, message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Shorthand for a data integrity violation
    pub fn integrity(message: impl Into<String>) -> Self {
        AppError::DataIntegrity {
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            AppError::DataIntegrity { .. } => ErrorCode::DataIntegrityError,
            AppError::UnknownResearcher { .. } => ErrorCode::UnknownResearcher,
            AppError::DuplicateIdentifier { .. } => ErrorCode::DuplicateIdentifier,
            AppError::NegativeCitations { .. } => ErrorCode::NegativeCitations,
            AppError::Io { .. } => ErrorCode::IoError,
            AppError::Csv(_) => ErrorCode::CsvError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Render { .. } => ErrorCode::RenderError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the coarse kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Configuration { .. } | AppError::InvalidParameter { .. } => {
                ErrorKind::Configuration
            }

            AppError::DataIntegrity { .. }
            | AppError::UnknownResearcher { .. }
            | AppError::DuplicateIdentifier { .. }
            | AppError::NegativeCitations { .. } => ErrorKind::DataIntegrity,

            AppError::Io { .. }
            | AppError::Csv(_)
            | AppError::Serialization(_)
            | AppError::Render { .. } => ErrorKind::Io,

            AppError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Process exit code for this error (0 is reserved for success)
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::DataIntegrity => 3,
            ErrorKind::Io => 4,
            ErrorKind::Internal => 1,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Configuration {
            message: errors.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::UnknownResearcher {
            publication_id: "P00001".into(),
            researcher_id: "R0042".into(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownResearcher);
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert_eq!(err.code().as_code(), 2002);
    }

    #[test]
    fn test_internal_error_is_not_io() {
        let err = AppError::from(anyhow::anyhow!("unexpected state"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_configuration_error() {
        let err = AppError::InvalidParameter {
            field: "researcher_count".into(),
            message: "must be positive".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_names_path() {
        let err = AppError::io(
            "out/data/publications.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("out/data/publications.csv"));
    }
}
