//! Tag extraction from audio files

use crate::{LocalError, Result};
use lofty::{Accessor, AudioFile, Probe, TaggedFileExt};
use std::path::Path;
use tunesync_core::Song;

/// Read the tags of an audio file into a local [`Song`]
pub fn read_song(path: &Path) -> Result<Song> {
    let tagged_file = Probe::open(path)
        .map_err(|e| LocalError::Metadata(format!("Failed to open file: {}", e)))?
        .read()
        .map_err(|e| LocalError::Metadata(format!("Failed to read file: {}", e)))?;

    let mut song = Song::local(path);

    let duration = tagged_file.properties().duration().as_secs();
    if duration > 0 {
        song = song.with_duration_seconds(duration);
    }

    // Prefer ID3v2 for MP3, Vorbis comments for OGG/FLAC
    let Some(tag) = tagged_file.primary_tag().or(tagged_file.first_tag()) else {
        return Ok(song);
    };

    if let Some(title) = tag.title() {
        song = song.with_title(title);
    }
    if let Some(artist) = tag.artist() {
        song = song.with_artist(artist);
    }
    if let Some(album) = tag.album() {
        song = song.with_album(album);
    }
    if let Some(album_artist) = tag.get_string(&lofty::ItemKey::AlbumArtist) {
        song = song.with_album_artist(album_artist);
    }
    if let Some(track) = tag.track() {
        song = song.with_track_number(track);
    }
    if let Some(disc) = tag.disk() {
        song = song.with_disc_number(disc);
    }
    if let Some(year) = tag.year() {
        song = song.with_year(year as i32);
    }
    song.total_tracks = tag.track_total();
    song.total_discs = tag.disk_total();

    Ok(song)
}

/// Read tags, falling back to a tagless song when they cannot be read
///
/// A tagless song has no identity key and is always reported as missing.
pub fn read_song_or_tagless(path: &Path) -> Song {
    match read_song(path) {
        Ok(song) => song,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable tags");
            Song::local(path)
        }
    }
}
