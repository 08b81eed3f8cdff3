//! Conversions from the two wire schemas into core song records.
//!
//! These are the only places that know how each remote view names its
//! fields.

use crate::types::{ManagerSong, MobilePlaylist, MobilePlaylistEntry, MobileSong};
use tunesync_core::{PlaylistEntry, RemotePlaylist, Song};

impl From<ManagerSong> for Song {
    fn from(remote: ManagerSong) -> Self {
        let mut song = with_tags(
            Song::manager(remote.id),
            remote.title,
            remote.artist,
            remote.album,
            remote.album_artist,
        );

        song.track_number = remote.track_number;
        song.total_tracks = remote.total_track_count;
        song.disc_number = remote.disc_number;
        song.total_discs = remote.total_disc_count;
        song.year = remote.year;
        song.duration_seconds = remote.duration_millis.map(|ms| ms / 1000);
        song
    }
}

impl From<MobileSong> for Song {
    fn from(remote: MobileSong) -> Self {
        let mut song = with_tags(
            Song::mobile(remote.id, remote.track_id),
            remote.title,
            remote.artist,
            remote.album,
            remote.album_artist,
        );

        song.track_number = remote.track_number;
        song.total_tracks = remote.total_track_count;
        song.disc_number = remote.disc_number;
        song.total_discs = remote.total_disc_count;
        song.year = remote.year;
        song.duration_seconds = parse_number::<u64>(remote.duration_millis).map(|ms| ms / 1000);
        song.rating = parse_number(remote.rating);
        song.last_modified = parse_number(remote.last_modified_timestamp);
        song
    }
}

impl From<MobilePlaylistEntry> for PlaylistEntry {
    fn from(entry: MobilePlaylistEntry) -> Self {
        PlaylistEntry::new(entry.id, entry.track_id)
    }
}

impl From<MobilePlaylist> for RemotePlaylist {
    fn from(playlist: MobilePlaylist) -> Self {
        RemotePlaylist::new(
            playlist.name,
            playlist.tracks.into_iter().map(PlaylistEntry::from).collect(),
        )
    }
}

fn with_tags(
    mut song: Song,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    album_artist: Option<String>,
) -> Song {
    if let Some(title) = title {
        song = song.with_title(title);
    }
    if let Some(artist) = artist {
        song = song.with_artist(artist);
    }
    if let Some(album) = album {
        song = song.with_album(album);
    }
    if let Some(album_artist) = album_artist {
        song = song.with_album_artist(album_artist);
    }
    song
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
