//! tunesync Core
//!
//! Platform-agnostic reconciliation core for tunesync.
//!
//! Everything in this crate is synchronous and side-effect free, so a
//! dry run and a real run share the exact same decision logic.
//!
//! # Architecture
//!
//! - **Song model**: [`Song`], [`SongCollection`], [`Provenance`]
//! - **Identity**: [`IdentityKey`] and the cross-provenance key rule
//! - **Filters**: [`Filter`], [`FilterSet`], [`ExcludePatterns`]
//! - **Comparator**: [`missing`] plus the post-hoc sort helpers
//! - **Playlists**: [`RemoteLookup`], [`favorites`], [`M3uPlaylist`]
//! - **Remote seam**: the [`RemoteLibrary`] trait implemented by transports
//!
//! # Example
//!
//! ```rust
//! use tunesync_core::{missing, Song};
//! use std::path::PathBuf;
//!
//! let local = vec![Song::local(PathBuf::from("/music/y.mp3"))
//!     .with_artist("X")
//!     .with_title("Y")
//!     .with_track_number(1)];
//! let remote: Vec<Song> = Vec::new();
//!
//! let to_upload = missing(&local, &remote);
//! assert_eq!(to_upload.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection;
pub mod compare;
pub mod context;
pub mod error;
pub mod filter;
pub mod identity;
pub mod m3u;
pub mod playlist;
pub mod song;
pub mod traits;

pub use collection::{classify, SongCollection};
pub use compare::{missing, sort_by_path, sort_for_transfer};
pub use context::RunContext;
pub use error::{CoreError, Result};
pub use filter::{ExcludePatterns, Filter, FilterSet, FilterVerdict};
pub use identity::{IdentityKey, KeyMode, TagKey};
pub use m3u::M3uPlaylist;
pub use playlist::{favorites, PlaylistEntry, RemoteLookup, RemotePlaylist, FAVORITES_PLAYLIST_NAME};
pub use song::{Provenance, Song, SongField};
pub use traits::{RemoteLibrary, TransferOutcome, UploadOptions};
