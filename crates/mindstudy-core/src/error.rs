//! Core error types for mindstudy-core.
//!
//! Session commands themselves never fail: invalid controls are silent
//! no-ops and out-of-range durations clamp. Errors exist only at the
//! file boundaries, the settings file and the planner task export.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindstudy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-file errors
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Planner task list errors
    #[error("task list error: {0}")]
    Tasks(#[from] TaskListError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings-file errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or parse the settings file
    #[error("failed to load settings from {}: {message}", .path.display())]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to serialize or write the settings file
    #[error("failed to save settings to {}: {message}", .path.display())]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not name a settings field
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Value cannot be parsed into the field's type
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Planner task export errors.
#[derive(Error, Debug)]
pub enum TaskListError {
    /// Export file exists but cannot be read
    #[error("failed to read task list {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export file is not a valid task array
    #[error("failed to parse task list {}: {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
