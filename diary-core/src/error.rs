//! Error types for the diary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in diary operations.
#[derive(Error, Debug)]
pub enum DiaryError {
    #[error(
        "{} is not a valid events file: {reason}\n\
         Fix the file by hand, or reset it to an empty array '[]' (this discards its events).",
        .path.display()
    )]
    CorruptStore { path: PathBuf, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for diary operations.
pub type DiaryResult<T> = Result<T, DiaryError>;
