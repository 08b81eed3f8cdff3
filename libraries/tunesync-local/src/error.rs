//! Error types for local collection access

use thiserror::Error;

/// Result type alias using `LocalError`
pub type Result<T> = std::result::Result<T, LocalError>;

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Failed to move temporary file into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}
