//! [`RemoteLibrary`] over HTTP.

use crate::client::TuneSyncClient;
use crate::error::ClientError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;
use tunesync_core::{RemoteLibrary, RemotePlaylist, Song, TransferOutcome, UploadOptions};

#[async_trait]
impl RemoteLibrary for TuneSyncClient {
    type Error = ClientError;

    async fn manager_songs(&self) -> Result<Vec<Song>, ClientError> {
        let songs = self
            .with_auto_refresh(move || async move {
                self.manager().await?.client().list_songs().await
            })
            .await?;

        Ok(songs.into_iter().map(Song::from).collect())
    }

    async fn mobile_songs(&self) -> Result<Vec<Song>, ClientError> {
        let songs = self
            .with_auto_refresh(move || async move {
                self.mobile().await?.client().list_songs().await
            })
            .await?;

        Ok(songs.into_iter().map(Song::from).collect())
    }

    async fn playlists(&self) -> Result<Vec<RemotePlaylist>, ClientError> {
        let playlists = self
            .with_auto_refresh(move || async move {
                self.mobile().await?.client().list_playlist_contents().await
            })
            .await?;

        Ok(playlists.into_iter().map(RemotePlaylist::from).collect())
    }

    async fn upload(&self, songs: &[Song], options: &UploadOptions) -> Vec<TransferOutcome> {
        let mut outcomes = Vec::with_capacity(songs.len());

        for song in songs {
            let Some(path) = song.local_path() else {
                outcomes.push(TransferOutcome::failed(song.clone(), "song has no local file"));
                continue;
            };

            let result = self
                .with_auto_refresh(move || async move {
                    self.manager().await?.client().upload_song(path, options).await
                })
                .await;

            outcomes.push(match result {
                Ok(_) => TransferOutcome::ok(song.clone()),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Upload failed");
                    TransferOutcome::failed(song.clone(), e.to_string())
                }
            });
        }

        outcomes
    }

    async fn download(&self, songs: &[(Song, PathBuf)]) -> Vec<TransferOutcome> {
        let mut outcomes = Vec::with_capacity(songs.len());

        for (song, dest) in songs {
            let Some(id) = song.remote_id() else {
                outcomes.push(TransferOutcome::failed(song.clone(), "song has no remote id"));
                continue;
            };

            let result = self
                .with_auto_refresh(move || async move {
                    self.manager().await?.client().download_song(id, dest).await
                })
                .await;

            outcomes.push(match result {
                Ok(_) => TransferOutcome::ok(song.clone()),
                Err(e) => {
                    warn!(song_id = %id, dest = %dest.display(), error = %e, "Download failed");
                    TransferOutcome::failed(song.clone(), e.to_string())
                }
            });
        }

        outcomes
    }
}
