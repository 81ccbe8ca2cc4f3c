//! Core error types for schoolroom-core.
//!
//! This module defines the error hierarchy using thiserror. Lookup misses
//! on mutation paths are deliberately *not* errors (they are silent no-ops,
//! see the store module); only validation, storage, and configuration
//! problems surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for schoolroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors raised when a caller supplies an out-of-range or
/// dangling reference to a mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Lesson slot outside the Monday-Friday school week
    #[error("Invalid schedule slot: day {day} is outside the school week (1-5)")]
    InvalidScheduleSlot { day: u8 },

    /// Lesson references a subject that does not exist
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    /// Lesson child does not match the subject's owning child
    #[error("Child {lesson_child} does not own subject {subject_id} (owner: {subject_child})")]
    ChildMismatch {
        subject_id: String,
        subject_child: String,
        lesson_child: String,
    },
}

/// Snapshot storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write the snapshot file
    #[error("Failed to access snapshot at {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file exists but could not be decoded
    #[error("Failed to decode snapshot at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
