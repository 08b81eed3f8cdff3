//! Seam between reconciliation and the remote service

use crate::playlist::RemotePlaylist;
use crate::song::Song;
use async_trait::async_trait;
use std::path::PathBuf;

/// Options forwarded with every upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Device identifier presented to the remote service
    pub uploader_id: Option<String>,

    /// Let the service match uploads against its catalog
    pub enable_matching: bool,
}

/// Per-song result of an upload or download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// The song that was transferred
    pub song: Song,

    /// `Err` carries a human-readable reason
    pub result: Result<(), String>,
}

impl TransferOutcome {
    /// Successful transfer
    pub fn ok(song: Song) -> Self {
        Self {
            song,
            result: Ok(()),
        }
    }

    /// Failed transfer
    pub fn failed(song: Song, reason: impl Into<String>) -> Self {
        Self {
            song,
            result: Err(reason.into()),
        }
    }

    /// Whether the transfer succeeded
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Remote music library exposing the manager and mobile views
///
/// Fetches fail as a whole; transfers report per song and never abort
/// the batch.
#[async_trait]
pub trait RemoteLibrary: Send + Sync {
    /// Error for fetch operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every song of the manager view
    async fn manager_songs(&self) -> Result<Vec<Song>, Self::Error>;

    /// Every song of the mobile view
    async fn mobile_songs(&self) -> Result<Vec<Song>, Self::Error>;

    /// User playlists with ordered entries
    async fn playlists(&self) -> Result<Vec<RemotePlaylist>, Self::Error>;

    /// Upload local songs
    async fn upload(&self, songs: &[Song], options: &UploadOptions) -> Vec<TransferOutcome>;

    /// Download manager songs to the paired destination paths
    async fn download(&self, songs: &[(Song, PathBuf)]) -> Vec<TransferOutcome>;
}
