//! Error types for the RpImages pack builder.
//!
//! Errors fall into three groups: fatal input errors that stop the whole run,
//! group-local errors that only exclude one group, and persisted-state
//! corruption, which is fatal so that a damaged table is never replaced by an
//! empty one.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the pack builder.
#[derive(Debug, Error)]
pub enum PackError {
    // Fatal input errors
    #[error("Pack root directory does not exist: {0}")]
    PackRootMissing(PathBuf),

    #[error("Source directory does not exist: {0}")]
    SourceMissing(PathBuf),

    // Group-local errors
    #[error("Meta file not found for group {group}: {path}")]
    DescriptorMissing { group: String, path: PathBuf },

    #[error("Invalid meta file for group {group}: {message}")]
    DescriptorInvalid { group: String, message: String },

    #[error("No item defined in meta for group {group}")]
    IdentityMissing { group: String },

    // Persisted state
    #[error("Corrupt override table for {identity} at {path}: {message}")]
    CorruptTable {
        identity: String,
        path: PathBuf,
        message: String,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Directory does not exist: {0}")]
    NotADirectory(PathBuf),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for pack builder operations.
pub type Result<T> = std::result::Result<T, PackError>;

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        PackError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl PackError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PackError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether this error only concerns a single group and the run can go on
    /// without it.
    pub fn is_group_local(&self) -> bool {
        matches!(
            self,
            PackError::DescriptorMissing { .. }
                | PackError::DescriptorInvalid { .. }
                | PackError::IdentityMissing { .. }
        )
    }

    /// Whether this error comes from missing run inputs.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            PackError::PackRootMissing(_)
                | PackError::SourceMissing(_)
                | PackError::Config { .. }
                | PackError::Validation { .. }
        )
    }

    /// Process exit status for a run that stopped on this error.
    ///
    /// - 2: missing inputs or bad configuration
    /// - 3: a persisted override table could not be parsed
    /// - 1: anything else (I/O, serialization)
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal_input() {
            return 2;
        }
        match self {
            PackError::CorruptTable { .. } => 3,
            _ => 1,
        }
    }
}
