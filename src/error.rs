//! Error types for nfd-config

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nfd-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nfd-config
///
/// Validation problems found in a configuration tree are *not* reported
/// through this type by the core functions; they come back as data (see
/// [`crate::validate_config`] and [`crate::ParseOutcome`]). This enum covers
/// the operations that can genuinely fail: file I/O, serialization and
/// loading of rule sets.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Rule / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid rule for {key}: {reason}")]
    InvalidRule { key: String, reason: String },

    #[error("Configuration is invalid: {}", .errors.join("; "))]
    InvalidConfig { errors: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error came from reading or writing the filesystem
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::FileWrite { .. } | Error::DirectoryCreate { .. }
        )
    }

    /// Validation messages carried by [`Error::InvalidConfig`], empty otherwise
    #[must_use]
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Error::InvalidConfig { errors } => errors,
            _ => &[],
        }
    }
}
