use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing a layout document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain a valid layout document: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application-level error type for a pipeline run.
///
/// Only `Load` aborts before any output exists. Structural and refinement
/// problems never surface here; they are recovered inside their own steps.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not load input: {0}")]
    Load(#[source] DocumentError),

    #[error("Could not save output: {0}")]
    Save(#[source] DocumentError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Load(_) => 2,
            AppError::Save(_) => 3,
            AppError::Config(_) => 64,
        }
    }
}
