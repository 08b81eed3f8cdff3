use super::{report, SyncOptions};
use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tunesync_core::{
    classify, missing, sort_for_transfer, ExcludePatterns, FilterSet, RemoteLibrary, RunContext,
    Song, SongCollection,
};
use tunesync_local::{
    create_private_dir_all, relocate, remove_empty_dirs, template_to_base_path, LocalScanner,
    PathTemplate,
};

/// What a `down` run decided and did
#[derive(Debug, Default)]
pub struct DownSummary {
    /// Local directory the account songs are laid out in
    pub base_path: PathBuf,
    /// Every song selected for download, across library, playlist and
    /// favorites passes
    pub to_download: Vec<Song>,
    pub downloaded: usize,
    pub failed: usize,
    /// Local files no longer in the account, at their original paths
    pub removed: Vec<PathBuf>,
    pub playlists: Vec<PlaylistReport>,
}

/// A playlist file written, or that would be written in a dry run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistReport {
    pub name: String,
    pub path: PathBuf,
    pub tracks: usize,
}

/// Download account songs missing from the local collection
///
/// With `removed_dir` set, local songs gone from the account are moved
/// there. With `playlists_dir` set, playlists and the favorites playlist
/// are written as M3U files after their songs are downloaded.
pub async fn sync_down<R: RemoteLibrary>(
    remote: &R,
    output: &PathTemplate,
    options: &SyncOptions,
    ctx: RunContext,
) -> Result<DownSummary> {
    info!("Fetching account songs");
    let remote_songs = classify(
        remote.manager_songs().await.map_err(SyncError::remote)?,
        &ExcludePatterns::none(),
        &options.filters,
    );

    let base_path = template_to_base_path(output, &remote_songs.matched);
    info!(path = %base_path.display(), "Syncing into local library");

    let mut run = DownRun {
        remote,
        output,
        options,
        ctx,
        summary: DownSummary {
            base_path,
            ..DownSummary::default()
        },
    };

    run.download_missing(&remote_songs.matched).await?;

    if let Some(removed_dir) = &options.removed_dir {
        run.move_removed(&remote_songs, removed_dir)?;
    }

    if let Some(playlists_dir) = &options.playlists_dir {
        run.sync_playlists(&remote_songs, playlists_dir).await?;
    }

    Ok(run.summary)
}

pub(super) struct DownRun<'a, R> {
    pub(super) remote: &'a R,
    pub(super) output: &'a PathTemplate,
    pub(super) options: &'a SyncOptions,
    pub(super) ctx: RunContext,
    pub(super) summary: DownSummary,
}

impl<R: RemoteLibrary> DownRun<'_, R> {
    /// Rescan the local library, then download whatever of `songs` it lacks
    pub(super) async fn download_missing(&mut self, songs: &[Song]) -> Result<()> {
        let local = self.scan_local()?;

        let mut to_download = missing(songs, &local.matched);
        sort_for_transfer(&mut to_download);

        if self.ctx.dry_run {
            report::found(self.ctx, to_download.len(), "download");
            report::song_list(
                self.ctx,
                "Songs to download",
                "No songs to download",
                &to_download,
            );
        } else if to_download.is_empty() {
            info!("No songs to download");
        } else {
            info!(count = to_download.len(), "Downloading songs");
            let batch: Vec<(Song, PathBuf)> = to_download
                .iter()
                .map(|song| {
                    let dest = self
                        .output
                        .resolve_with_extension(song, &self.options.audio_extension);
                    (song.clone(), dest)
                })
                .collect();

            for outcome in self.remote.download(&batch).await {
                match &outcome.result {
                    Ok(()) => {
                        self.summary.downloaded += 1;
                        info!(song = %outcome.song, "Downloaded");
                    }
                    Err(reason) => {
                        self.summary.failed += 1;
                        warn!(song = %outcome.song, reason = %reason, "Failed to download");
                    }
                }
            }
        }

        self.summary.to_download.extend(to_download);
        Ok(())
    }

    /// Move local songs absent from the account into `removed_dir`
    ///
    /// Every local bucket is compared against every non-excluded account
    /// song, so neither filters nor exclude patterns protect a local file
    /// that the account no longer has.
    fn move_removed(&mut self, remote_songs: &SongCollection, removed_dir: &Path) -> Result<()> {
        info!("Moving removed songs");
        let local = self.scan_local()?;
        let to_move = missing(&local.all(), &remote_songs.matched_and_filtered());

        if !self.ctx.dry_run {
            create_private_dir_all(removed_dir)?;
        }

        let base_path = self.summary.base_path.clone();
        for song in &to_move {
            let Some(path) = song.local_path() else {
                continue;
            };

            if self.ctx.dry_run {
                println!("Would remove {}", path.display());
            } else {
                match relocate(path, &base_path, removed_dir) {
                    Ok(dest) => info!(from = %path.display(), to = %dest.display(), "Removed"),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to move removed song");
                        continue;
                    }
                }
            }
            self.summary.removed.push(path.to_path_buf());
        }

        if !self.ctx.dry_run {
            remove_empty_dirs(&base_path, false)?;
        }

        Ok(())
    }

    /// Local songs under the base path, exclude patterns applied, no filters
    ///
    /// Songs already moved into the removed directory are not part of the
    /// library, even when that directory sits below the base path.
    fn scan_local(&self) -> Result<SongCollection> {
        let mut scanner = LocalScanner::new();
        if let Some(removed_dir) = &self.options.removed_dir {
            scanner = scanner.skip_dir(removed_dir);
        }

        let inputs = [self.summary.base_path.clone()];
        Ok(scanner.scan(&inputs, &self.options.exclude, &FilterSet::new())?)
    }
}
