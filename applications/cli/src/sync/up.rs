use super::{report, SyncOptions};
use crate::error::{Result, SyncError};
use std::path::PathBuf;
use tracing::{info, warn};
use tunesync_core::{missing, sort_by_path, RemoteLibrary, RunContext, Song, SongCollection};
use tunesync_local::LocalScanner;

/// What an `up` run decided and did
#[derive(Debug, Default)]
pub struct UpSummary {
    /// Local songs missing from the account, sorted by path
    pub to_upload: Vec<Song>,
    /// Local songs rejected by the field filters
    pub filtered: Vec<Song>,
    /// Local songs matching an exclude pattern, sorted by path
    pub excluded: Vec<Song>,
    pub uploaded: usize,
    pub failed: usize,
    /// Local files deleted after upload
    pub deleted: usize,
}

/// Upload local songs that the account does not have yet
pub async fn sync_up<R: RemoteLibrary>(
    remote: &R,
    inputs: &[PathBuf],
    options: &SyncOptions,
    ctx: RunContext,
) -> Result<UpSummary> {
    info!("Fetching account songs");
    let remote_songs =
        SongCollection::all_matched(remote.manager_songs().await.map_err(SyncError::remote)?);

    let local = LocalScanner::new()
        .max_depth(options.max_depth)
        .scan(inputs, &options.exclude, &options.filters)?;

    info!("Finding missing songs");
    let mut to_upload = missing(&local.matched, &remote_songs.matched);
    sort_by_path(&mut to_upload);
    let mut excluded = local.excluded;
    sort_by_path(&mut excluded);

    let mut summary = UpSummary {
        to_upload,
        filtered: local.filtered,
        excluded,
        ..UpSummary::default()
    };

    if ctx.dry_run {
        report::found(ctx, summary.to_upload.len(), "upload");
        report::song_list(ctx, "Songs to upload", "No songs to upload", &summary.to_upload);
        report::song_list(ctx, "Songs to filter", "No songs to filter", &summary.filtered);
        report::song_list(ctx, "Songs to exclude", "No songs to exclude", &summary.excluded);
        return Ok(summary);
    }

    if summary.to_upload.is_empty() {
        info!("No songs to upload");

        // Everything matched is already in the account
        if options.delete_on_success {
            for song in &local.matched {
                summary.deleted += usize::from(delete_local(song));
            }
        }
        return Ok(summary);
    }

    info!(count = summary.to_upload.len(), "Uploading songs");
    let outcomes = remote.upload(&summary.to_upload, &options.upload).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => {
                summary.uploaded += 1;
                info!(song = %outcome.song, "Uploaded");
                if options.delete_on_success {
                    summary.deleted += usize::from(delete_local(&outcome.song));
                }
            }
            Err(reason) => {
                summary.failed += 1;
                warn!(song = %outcome.song, reason = %reason, "Failed to upload");
            }
        }
    }

    Ok(summary)
}

/// Delete a song's local file, returning whether it was removed
fn delete_local(song: &Song) -> bool {
    let Some(path) = song.local_path() else {
        return false;
    };

    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove file after successful upload"
            );
            false
        }
    }
}
