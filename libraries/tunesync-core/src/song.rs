//! Song domain types

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which source produced a [`Song`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Scanned from the local filesystem
    Local,
    /// Music-manager remote view (upload/download view, keyed by `id`)
    Manager,
    /// Mobile-client remote view (ratings, playlists, optional `trackId`)
    Mobile,
}

impl Provenance {
    /// Whether this provenance is one of the two remote views
    pub fn is_remote(self) -> bool {
        matches!(self, Provenance::Manager | Provenance::Mobile)
    }
}

/// Canonical song record shared by every provenance
///
/// Remote identifiers are only set through the constructors, so the
/// resolved [`Song::remote_key`] can never drift from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Track artist
    pub artist: Option<String>,

    /// Album title
    pub album: Option<String>,

    /// Track title
    pub title: Option<String>,

    /// Album artist
    pub album_artist: Option<String>,

    /// Track number
    pub track_number: Option<u32>,

    /// Number of tracks on the disc
    pub total_tracks: Option<u32>,

    /// Disc number
    pub disc_number: Option<u32>,

    /// Number of discs in the release
    pub total_discs: Option<u32>,

    /// Release year
    pub year: Option<i32>,

    /// Duration in whole seconds
    pub duration_seconds: Option<u64>,

    /// Rating 0-5 (mobile view only)
    pub rating: Option<u8>,

    /// Last modification timestamp (mobile view only)
    pub last_modified: Option<i64>,

    remote_id: Option<String>,
    track_id: Option<String>,
    remote_key: Option<String>,
    local_path: Option<PathBuf>,
    provenance: Provenance,
}

impl Song {
    fn empty(provenance: Provenance) -> Self {
        Self {
            artist: None,
            album: None,
            title: None,
            album_artist: None,
            track_number: None,
            total_tracks: None,
            disc_number: None,
            total_discs: None,
            year: None,
            duration_seconds: None,
            rating: None,
            last_modified: None,
            remote_id: None,
            track_id: None,
            remote_key: None,
            local_path: None,
            provenance,
        }
    }

    /// Create a song for a local file
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: Some(path.into()),
            ..Self::empty(Provenance::Local)
        }
    }

    /// Create a song from the music-manager view
    pub fn manager(id: impl Into<String>) -> Self {
        let id = non_empty(id.into());
        Self {
            remote_key: id.clone(),
            remote_id: id,
            ..Self::empty(Provenance::Manager)
        }
    }

    /// Create a song from the mobile-client view
    ///
    /// `track_id`, when present, takes precedence over `id` for identity.
    pub fn mobile(id: impl Into<String>, track_id: Option<String>) -> Self {
        let id = non_empty(id.into());
        let track_id = track_id.and_then(non_empty);
        Self {
            remote_key: track_id.clone().or_else(|| id.clone()),
            remote_id: id,
            track_id,
            ..Self::empty(Provenance::Mobile)
        }
    }

    /// Set the artist (empty strings are treated as unset)
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = non_empty(artist.into());
        self
    }

    /// Set the album (empty strings are treated as unset)
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = non_empty(album.into());
        self
    }

    /// Set the title (empty strings are treated as unset)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Set the album artist (empty strings are treated as unset)
    pub fn with_album_artist(mut self, album_artist: impl Into<String>) -> Self {
        self.album_artist = non_empty(album_artist.into());
        self
    }

    /// Set the track number
    pub fn with_track_number(mut self, track_number: u32) -> Self {
        self.track_number = Some(track_number);
        self
    }

    /// Set the disc number
    pub fn with_disc_number(mut self, disc_number: u32) -> Self {
        self.disc_number = Some(disc_number);
        self
    }

    /// Set the release year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the duration in seconds
    pub fn with_duration_seconds(mut self, seconds: u64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the last modification timestamp
    pub fn with_last_modified(mut self, timestamp: i64) -> Self {
        self.last_modified = Some(timestamp);
        self
    }

    /// Which source produced this record
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Primary remote identifier
    pub fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }

    /// Alternate remote identifier (mobile view)
    pub fn track_id(&self) -> Option<&str> {
        self.track_id.as_deref()
    }

    /// Identifier used for remote identity: `track_id` if present, else `remote_id`
    pub fn remote_key(&self) -> Option<&str> {
        self.remote_key.as_deref()
    }

    /// Path of the local file, if this song was scanned locally
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// Whether the song was rated thumbs-up (rating strictly above 3)
    pub fn is_thumbs_up(&self) -> bool {
        self.rating.is_some_and(|rating| rating > 3)
    }

    /// Stringified value of a field, `None` when unset
    pub fn field_value(&self, field: SongField) -> Option<String> {
        match field {
            SongField::Artist => text(self.artist.as_deref()),
            SongField::Album => text(self.album.as_deref()),
            SongField::Title => text(self.title.as_deref()),
            SongField::AlbumArtist => text(self.album_artist.as_deref()),
            SongField::TrackNumber => self.track_number.map(|n| n.to_string()),
            SongField::TotalTracks => self.total_tracks.map(|n| n.to_string()),
            SongField::DiscNumber => self.disc_number.map(|n| n.to_string()),
            SongField::TotalDiscs => self.total_discs.map(|n| n.to_string()),
            SongField::Year => self.year.map(|y| y.to_string()),
            SongField::Duration => self.duration_seconds.map(|d| d.to_string()),
            SongField::Rating => self.rating.map(|r| r.to_string()),
            SongField::Path => self
                .local_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.local_path {
            return write!(f, "{}", path.display());
        }

        write!(
            f,
            "{} -- {} -- {}",
            self.title.as_deref().unwrap_or("<title>"),
            self.artist.as_deref().unwrap_or("<artist>"),
            self.album.as_deref().unwrap_or("<album>"),
        )?;

        if let Some(key) = self.remote_key() {
            write!(f, " ({})", key)?;
        }

        Ok(())
    }
}

/// Song fields that can be targeted by `field:pattern` filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongField {
    /// Track artist
    Artist,
    /// Album title
    Album,
    /// Track title
    Title,
    /// Album artist
    AlbumArtist,
    /// Track number
    TrackNumber,
    /// Total tracks on the disc
    TotalTracks,
    /// Disc number
    DiscNumber,
    /// Total discs
    TotalDiscs,
    /// Release year
    Year,
    /// Duration in seconds
    Duration,
    /// Rating
    Rating,
    /// Local file path
    Path,
}

impl SongField {
    /// Canonical field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SongField::Artist => "artist",
            SongField::Album => "album",
            SongField::Title => "title",
            SongField::AlbumArtist => "album_artist",
            SongField::TrackNumber => "track_number",
            SongField::TotalTracks => "total_tracks",
            SongField::DiscNumber => "disc_number",
            SongField::TotalDiscs => "total_discs",
            SongField::Year => "year",
            SongField::Duration => "duration",
            SongField::Rating => "rating",
            SongField::Path => "path",
        }
    }
}

impl FromStr for SongField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let field = match s.trim().to_lowercase().as_str() {
            "artist" => SongField::Artist,
            "album" => SongField::Album,
            "title" => SongField::Title,
            "album_artist" | "albumartist" => SongField::AlbumArtist,
            "track_number" | "tracknumber" | "track" => SongField::TrackNumber,
            "total_tracks" | "totaltracks" => SongField::TotalTracks,
            "disc_number" | "discnumber" | "disc" => SongField::DiscNumber,
            "total_discs" | "totaldiscs" => SongField::TotalDiscs,
            "year" | "date" => SongField::Year,
            "duration" => SongField::Duration,
            "rating" => SongField::Rating,
            "path" | "filepath" => SongField::Path,
            other => return Err(format!("unknown field '{}'", other)),
        };
        Ok(field)
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn text(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_takes_precedence() {
        let song = Song::mobile("id-1", Some("track-9".to_string()));
        assert_eq!(song.remote_key(), Some("track-9"));
        assert_eq!(song.remote_id(), Some("id-1"));

        let song = Song::mobile("id-1", None);
        assert_eq!(song.remote_key(), Some("id-1"));

        let song = Song::mobile("id-1", Some(String::new()));
        assert_eq!(song.remote_key(), Some("id-1"));
    }

    #[test]
    fn empty_strings_are_unset() {
        let song = Song::manager("m1").with_artist("   ").with_title("Title");
        assert!(song.artist.is_none());
        assert_eq!(song.field_value(SongField::Artist), None);
        assert_eq!(song.field_value(SongField::Title), Some("Title".to_string()));
    }

    #[test]
    fn thumbs_up_threshold() {
        assert!(!Song::mobile("a", None).with_rating(3).is_thumbs_up());
        assert!(Song::mobile("a", None).with_rating(4).is_thumbs_up());
        assert!(Song::mobile("a", None).with_rating(5).is_thumbs_up());
        assert!(!Song::mobile("a", None).is_thumbs_up());
    }

    #[test]
    fn field_names_parse_with_aliases() {
        assert_eq!("artist".parse::<SongField>(), Ok(SongField::Artist));
        assert_eq!("AlbumArtist".parse::<SongField>(), Ok(SongField::AlbumArtist));
        assert_eq!("tracknumber".parse::<SongField>(), Ok(SongField::TrackNumber));
        assert_eq!("date".parse::<SongField>(), Ok(SongField::Year));
        assert!("genre".parse::<SongField>().is_err());
    }

    #[test]
    fn display_uses_path_for_local_songs() {
        let song = Song::local("/music/a.mp3").with_title("A");
        assert_eq!(song.to_string(), "/music/a.mp3");

        let song = Song::manager("m1").with_title("Y").with_artist("X");
        assert_eq!(song.to_string(), "Y -- X -- <album> (m1)");
    }
}
