//! Music-manager view: song listing, upload and download.

use crate::error::{ClientError, Result};
use crate::types::{ManagerSong, ManagerSongList, UploadResponse};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};
use tunesync_core::UploadOptions;

/// Client for the music-manager view.
pub struct ManagerClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> ManagerClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List every song in the account.
    pub async fn list_songs(&self) -> Result<Vec<ManagerSong>> {
        let url = format!("{}/api/manager/songs", self.base_url);
        debug!(url = %url, "Fetching manager songs");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let list: ManagerSongList = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse manager songs: {}", e))
        })?;

        debug!(songs = list.songs.len(), "Fetched manager songs");
        Ok(list.songs)
    }

    /// Upload a single local file.
    ///
    /// The file is streamed from disk rather than read into memory.
    pub async fn upload_song(
        &self,
        file_path: &Path,
        options: &UploadOptions,
    ) -> Result<UploadResponse> {
        if !file_path.is_file() {
            return Err(ClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("song")
            .to_string();

        debug!(file = %file_path.display(), "Uploading song");

        let file = tokio::fs::File::open(file_path).await?;
        let file_size = file.metadata().await?.len();
        let body = Body::wrap_stream(ReaderStream::new(file));

        let file_part = Part::stream_with_length(body, file_size)
            .file_name(file_name.clone())
            .mime_str(mime_type_for_file(file_path))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("enable_matching", options.enable_matching.to_string());

        if let Some(uploader_id) = &options.uploader_id {
            form = form.text("uploader_id", uploader_id.clone());
        }

        let url = format!("{}/api/manager/songs", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let upload_response: UploadResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse upload response: {}", e))
            })?;

            info!(
                id = %upload_response.id,
                file = %file_name,
                size = file_size,
                matched = upload_response.matched,
                "Song uploaded"
            );

            Ok(upload_response)
        } else if status.as_u16() == 413 {
            Err(ClientError::ServerError {
                status: 413,
                message: "File too large".to_string(),
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Download a song to `dest_path`.
    ///
    /// The body is streamed into a temporary file next to the destination
    /// and only moved into place once complete. Returns the byte count.
    pub async fn download_song(&self, song_id: &str, dest_path: &Path) -> Result<u64> {
        let url = format!("{}/api/manager/songs/{}/download", self.base_url, song_id);
        debug!(url = %url, song_id = %song_id, dest = %dest_path.display(), "Downloading song");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(ClientError::ServerError {
                    status: 404,
                    message: format!("Song not found: {}", song_id),
                });
            }
            return Err(ClientError::from_response(response).await);
        }

        let parent = dest_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent).await?;

        let temp = NamedTempFile::new_in(parent)?;
        let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
        let mut downloaded: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await?;
        drop(file);
        temp.persist(dest_path)?;

        info!(
            song_id = %song_id,
            dest = %dest_path.display(),
            size = downloaded,
            "Song downloaded"
        );

        Ok(downloaded)
    }
}

/// Get MIME type for audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
