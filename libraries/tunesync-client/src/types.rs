//! Types for the music library service requests and responses.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to the music library service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://music.example.com")
    pub url: String,
    /// Current access token (if authenticated)
    pub access_token: Option<String>,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            refresh_token: None,
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Token validity in seconds
    pub expires_in: u64,
    pub username: String,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response from token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

// =============================================================================
// Music Manager View
// =============================================================================

/// A song as listed by the music-manager view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerSong {
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub track_number: Option<u32>,
    pub total_track_count: Option<u32>,
    pub disc_number: Option<u32>,
    pub total_disc_count: Option<u32>,
    pub year: Option<i32>,
    pub duration_millis: Option<u64>,
}

/// Response for the manager song listing.
#[derive(Debug, Deserialize)]
pub struct ManagerSongList {
    pub songs: Vec<ManagerSong>,
}

/// Response from a successful upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Id assigned to the uploaded song
    pub id: String,
    /// Whether the service matched the upload against its catalog
    #[serde(default)]
    pub matched: bool,
}

// =============================================================================
// Mobile Client View
// =============================================================================

/// A song as listed by the mobile-client view.
///
/// Numeric fields that this view serializes as strings are kept as
/// strings here and parsed when converting into a song.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileSong {
    pub id: String,
    pub track_id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub track_number: Option<u32>,
    pub total_track_count: Option<u32>,
    pub disc_number: Option<u32>,
    pub total_disc_count: Option<u32>,
    pub year: Option<i32>,
    pub duration_millis: Option<String>,
    pub rating: Option<String>,
    pub last_modified_timestamp: Option<String>,
}

/// Response for the mobile song listing.
#[derive(Debug, Deserialize)]
pub struct MobileSongList {
    pub songs: Vec<MobileSong>,
}

/// One entry of a user playlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobilePlaylistEntry {
    pub id: String,
    pub track_id: Option<String>,
}

/// A user playlist with its ordered entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobilePlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<MobilePlaylistEntry>,
}

/// Response for the playlist contents listing.
#[derive(Debug, Deserialize)]
pub struct MobilePlaylistList {
    pub playlists: Vec<MobilePlaylist>,
}

/// A device registered with the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub id: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

/// Response for the registered devices listing.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    pub devices: Vec<DeviceInfo>,
}
