//! Mobile-client view: rated song listing, playlists and devices.

use crate::error::{ClientError, Result};
use crate::types::{
    DeviceInfo, DeviceList, MobilePlaylist, MobilePlaylistList, MobileSong, MobileSongList,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the mobile-client view.
pub struct MobileClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> MobileClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// List every song with ratings and modification timestamps.
    pub async fn list_songs(&self) -> Result<Vec<MobileSong>> {
        let list: MobileSongList = self.get("/api/mobile/songs", "mobile songs").await?;
        debug!(songs = list.songs.len(), "Fetched mobile songs");
        Ok(list.songs)
    }

    /// List user playlists with their ordered entries.
    pub async fn list_playlist_contents(&self) -> Result<Vec<MobilePlaylist>> {
        let list: MobilePlaylistList = self
            .get("/api/mobile/playlists/contents", "playlists")
            .await?;
        debug!(playlists = list.playlists.len(), "Fetched playlists");
        Ok(list.playlists)
    }

    /// List devices registered with the account.
    ///
    /// Cheap authenticated call, used to check that stored credentials
    /// still work.
    pub async fn registered_devices(&self) -> Result<Vec<DeviceInfo>> {
        let list: DeviceList = self.get("/api/mobile/devices", "devices").await?;
        Ok(list.devices)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, what: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, "Fetching {}", what);

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

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    }
}
