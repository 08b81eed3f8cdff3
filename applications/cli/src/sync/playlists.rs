use super::down::{DownRun, PlaylistReport};
use crate::error::{Result, SyncError};
use std::path::Path;
use tracing::info;
use tunesync_core::{favorites, RemoteLibrary, RemoteLookup, Song, SongCollection};
use tunesync_local::{build_playlist, create_private_dir_all, playlist_path, write_playlist};

impl<R: RemoteLibrary> DownRun<'_, R> {
    /// Download playlist and favorite songs, then write their M3U files
    pub(super) async fn sync_playlists(
        &mut self,
        remote_songs: &SongCollection,
        playlists_dir: &Path,
    ) -> Result<()> {
        info!("Syncing playlists");
        let mobile = self.remote.mobile_songs().await.map_err(SyncError::remote)?;
        let playlists = self.remote.playlists().await.map_err(SyncError::remote)?;

        // Playlist entries resolve whatever the download filters selected
        let lookup = RemoteLookup::new(&mobile, &remote_songs.matched_and_filtered());

        if !self.ctx.dry_run {
            create_private_dir_all(playlists_dir)?;
        }

        info!(playlists = playlists.len(), "Fetching playlist songs");
        let tracks = lookup.playlist_tracks(&playlists);
        self.download_missing(&tracks).await?;

        for playlist in &playlists {
            let songs = lookup.playlist_songs(playlist);
            self.write_playlist_file(&playlist.name, &songs, playlists_dir)?;
        }

        info!("Fetching favorite songs");
        let favorite_songs = favorites(&mobile);
        let favorite_tracks = lookup.manager_tracks(&favorite_songs);
        self.download_missing(&favorite_tracks).await?;

        let name = self.options.favorites_name.clone();
        self.write_playlist_file(&name, &favorite_songs, playlists_dir)?;

        Ok(())
    }

    fn write_playlist_file(&mut self, name: &str, songs: &[Song], dir: &Path) -> Result<()> {
        let path = if self.ctx.dry_run {
            playlist_path(dir, name)
        } else {
            let playlist = build_playlist(songs, self.output, dir, &self.options.audio_extension);
            write_playlist(dir, name, &playlist)?
        };

        println!("Playlist ({} tracks): {}", songs.len(), path.display());
        self.summary.playlists.push(PlaylistReport {
            name: name.to_string(),
            path,
            tracks: songs.len(),
        });

        Ok(())
    }
}
