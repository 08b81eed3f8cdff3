//! Sync run errors

use thiserror::Error;
use tunesync_core::CoreError;
use tunesync_local::LocalError;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid filter: {0}")]
    Filter(#[from] CoreError),

    #[error("Local library error: {0}")]
    Local(#[from] LocalError),

    #[error("Remote library error: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Wrap a fetch failure of any remote library
    pub fn remote<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SyncError::Remote(Box::new(err))
    }
}
