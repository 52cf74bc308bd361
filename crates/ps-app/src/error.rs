//! Error types for the ps-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read workbench file {path}: {source}")]
    WorkbenchFileRead {
        path: PathBuf,
        source: ps_project::ProjectError,
    },

    #[error("Failed to write workbench file {path}: {source}")]
    WorkbenchFileWrite {
        path: PathBuf,
        source: ps_project::ProjectError,
    },

    #[error("Invalid gains: {0}")]
    Gains(#[from] ps_core::CoreError),

    #[error("Invalid plant: {0}")]
    Plant(#[from] ps_controls::ControlError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A {0} run is already in progress")]
    Busy(crate::RunMode),

    #[error("No run in progress")]
    NotRunning,

    #[error("Run cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ps-app operations.
pub type AppResult<T> = Result<T, AppError>;
