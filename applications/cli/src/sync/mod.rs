//! Sync runs
//!
//! `up` uploads local songs missing from the account, `down` downloads
//! account songs missing locally and optionally moves removed songs aside
//! and writes playlists. Both are generic over [`RemoteLibrary`] and take
//! every decision through the side-effect free core, so a dry run reports
//! exactly what a real run would act on.
//!
//! [`RemoteLibrary`]: tunesync_core::RemoteLibrary

mod down;
mod playlists;
mod report;
mod up;

pub use down::{sync_down, DownSummary, PlaylistReport};
pub use up::{sync_up, UpSummary};

use std::path::PathBuf;
use tunesync_core::{ExcludePatterns, FilterSet, UploadOptions};

/// Everything a run needs besides its inputs and the remote library
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Local paths to leave alone
    pub exclude: ExcludePatterns,
    /// Field filters, applied to local songs (up) or account songs (down)
    pub filters: FilterSet,
    /// Scan depth, `None` for unlimited
    pub max_depth: Option<usize>,
    pub upload: UploadOptions,
    pub delete_on_success: bool,
    /// Absolute directory for M3U files, enables playlist sync
    pub playlists_dir: Option<PathBuf>,
    /// Absolute directory receiving songs removed from the account
    pub removed_dir: Option<PathBuf>,
    pub favorites_name: String,
    pub audio_extension: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            exclude: ExcludePatterns::none(),
            filters: FilterSet::new(),
            max_depth: None,
            upload: UploadOptions::default(),
            delete_on_success: false,
            playlists_dir: None,
            removed_dir: None,
            favorites_name: tunesync_core::FAVORITES_PLAYLIST_NAME.to_string(),
            audio_extension: "mp3".to_string(),
        }
    }
}
