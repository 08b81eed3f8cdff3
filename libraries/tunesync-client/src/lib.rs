//! tunesync Client
//!
//! HTTP client for a cloud music library account and its two views.
//!
//! # Features
//!
//! - **Authentication**: login with username/password, token refresh, a
//!   cached credential store
//! - **Music-manager view**: song listing, streamed upload and download
//! - **Mobile-client view**: rated song listing, playlists, devices
//! - **Reconciliation seam**: [`TuneSyncClient`] implements
//!   [`tunesync_core::RemoteLibrary`]
//!
//! # Example
//!
//! ```ignore
//! use tunesync_client::{authenticate, ClientConfig, CredentialStore, TuneSyncClient};
//! use tunesync_core::RemoteLibrary;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TuneSyncClient::new(ClientConfig::new("https://music.example.com"))?;
//!     let store = CredentialStore::default_location()?;
//!     authenticate(&client, &store, "oauth", Some(("user", "password"))).await?;
//!
//!     let songs = client.manager_songs().await?;
//!     println!("Found {} songs", songs.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod convert;
mod credentials;
mod error;
mod manager;
mod mobile;
mod remote;
mod types;

pub use client::{ManagerClientHandle, MobileClientHandle, TuneSyncClient};
pub use credentials::{authenticate, CredentialStore, StoredCredentials};
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, DeviceInfo, LoginResponse, ManagerSong, MobilePlaylist, MobilePlaylistEntry,
    MobileSong, RefreshTokenResponse, UploadResponse,
};

pub use auth::AuthClient;
pub use manager::ManagerClient;
pub use mobile::MobileClient;
