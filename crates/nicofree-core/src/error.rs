//! Core error types for nicofree-core.
//!
//! Persistence failures at session boundaries are recoverable by design: the
//! stores log and fall back to safe defaults rather than surfacing errors to
//! the caller. These types cover the paths that do propagate (opening the
//! database, explicit profile edits, CLI input validation).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nicofree-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Profile configuration errors
    #[error("Profile error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record-file specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the records file
    #[error("Failed to read records from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records file exists but does not parse
    #[error("Failed to parse records at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Records file was written by a newer schema
    #[error("Unsupported records schema version {found} at {path}")]
    UnsupportedVersion { path: PathBuf, found: u32 },

    /// Failed to write the records file
    #[error("Failed to write records to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Profile configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the profile
    #[error("Failed to load profile from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the profile
    #[error("Failed to save profile to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
