//! Playlist and favorites derivation
//!
//! Playlists live in the mobile view while downloads go through the
//! manager view, so every playlist entry is resolved to its manager
//! counterpart by remote key before comparison.

use crate::song::Song;
use std::collections::{HashMap, HashSet};

/// Default name of the synthetic favorites playlist
pub const FAVORITES_PLAYLIST_NAME: &str = "___auto_favorites___";

/// Reference to a song of the mobile view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    id: String,
    track_id: Option<String>,
}

impl PlaylistEntry {
    /// Create an entry; an empty `track_id` counts as absent
    pub fn new(id: impl Into<String>, track_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            track_id: track_id.filter(|t| !t.is_empty()),
        }
    }

    /// `track_id` if present, else `id`
    pub fn key(&self) -> &str {
        self.track_id.as_deref().unwrap_or(&self.id)
    }
}

/// A user playlist with its ordered entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlaylist {
    /// Playlist name
    pub name: String,

    /// Entries in playlist order
    pub entries: Vec<PlaylistEntry>,
}

impl RemotePlaylist {
    /// Create a playlist
    pub fn new(name: impl Into<String>, entries: Vec<PlaylistEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// Remote-key lookup tables over both remote views
#[derive(Debug, Clone, Default)]
pub struct RemoteLookup {
    mobile: HashMap<String, Song>,
    manager: HashMap<String, Song>,
}

impl RemoteLookup {
    /// Index the complete mobile set and the manager songs
    ///
    /// `manager` should hold the matched and filtered manager songs, so that
    /// playlist entries resolve regardless of the download filters.
    pub fn new(mobile: &[Song], manager: &[Song]) -> Self {
        Self {
            mobile: index(mobile),
            manager: index(manager),
        }
    }

    /// Mobile record for a remote key
    pub fn mobile_song(&self, key: &str) -> Option<&Song> {
        self.mobile.get(key)
    }

    /// Manager record for a remote key
    pub fn manager_song(&self, key: &str) -> Option<&Song> {
        self.manager.get(key)
    }

    /// Resolve ordered keys to manager songs
    ///
    /// Duplicates keep their first occurrence. Keys with no manager
    /// counterpart are skipped.
    pub fn resolve_tracks<'a, I>(&self, keys: I) -> Vec<Song>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut tracks = Vec::new();

        for key in keys {
            if !seen.insert(key) {
                continue;
            }

            match self.manager.get(key) {
                Some(song) => tracks.push(song.clone()),
                None => tracing::debug!(key, "No manager song for remote key, skipping"),
            }
        }

        tracks
    }

    /// Manager songs referenced by any playlist, deduplicated across playlists
    pub fn playlist_tracks(&self, playlists: &[RemotePlaylist]) -> Vec<Song> {
        self.resolve_tracks(
            playlists
                .iter()
                .flat_map(|playlist| playlist.entries.iter().map(PlaylistEntry::key)),
        )
    }

    /// Manager songs for an already ordered list of mobile songs
    pub fn manager_tracks(&self, songs: &[Song]) -> Vec<Song> {
        self.resolve_tracks(songs.iter().filter_map(Song::remote_key))
    }

    /// Mobile records of a playlist in playlist order, unknown entries skipped
    pub fn playlist_songs(&self, playlist: &RemotePlaylist) -> Vec<Song> {
        playlist
            .entries
            .iter()
            .filter_map(|entry| {
                let song = self.mobile.get(entry.key());
                if song.is_none() {
                    tracing::debug!(
                        playlist = %playlist.name,
                        key = entry.key(),
                        "Playlist entry not in mobile library"
                    );
                }
                song.cloned()
            })
            .collect()
    }
}

fn index(songs: &[Song]) -> HashMap<String, Song> {
    songs
        .iter()
        .filter_map(|song| song.remote_key().map(|key| (key.to_string(), song.clone())))
        .collect()
}

/// Thumbs-up songs, most recently modified first
///
/// Songs without a timestamp come last; ties keep input order.
pub fn favorites(mobile: &[Song]) -> Vec<Song> {
    let mut songs: Vec<Song> = mobile
        .iter()
        .filter(|song| song.is_thumbs_up())
        .cloned()
        .collect();

    songs.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    songs
}
