//! Identity keys used to decide whether two song records are the same track.
//!
//! Local files carry no remote identifier, so any comparison that involves
//! local songs uses a normalized tag tuple on both sides. Comparisons
//! between the two remote views use the remote key only; text metadata is
//! never trusted across views.

use crate::song::Song;

/// Normalized `(artist, album, title, track_number)` tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey {
    artist: String,
    album: String,
    title: String,
    track_number: Option<u32>,
}

impl TagKey {
    /// Derive the tag key of a song
    ///
    /// Returns `None` when both artist and title are unset, since such a
    /// song cannot be told apart from any other.
    pub fn from_song(song: &Song) -> Option<Self> {
        let artist = song.artist.as_deref().map(normalize).unwrap_or_default();
        let title = song.title.as_deref().map(normalize).unwrap_or_default();

        if artist.is_empty() && title.is_empty() {
            return None;
        }

        Some(Self {
            artist,
            album: song.album.as_deref().map(normalize).unwrap_or_default(),
            title,
            track_number: song.track_number,
        })
    }
}

/// Which identity rule a comparison uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Normalized tags on both sides (any comparison involving local songs)
    Tags,
    /// Remote key on both sides (remote view against remote view)
    Remote,
}

impl KeyMode {
    /// Pick the rule for comparing `source` against `target`
    pub fn between(source: &[Song], target: &[Song]) -> Self {
        let all_remote = source
            .iter()
            .chain(target.iter())
            .all(|song| song.provenance().is_remote());

        if all_remote {
            KeyMode::Remote
        } else {
            KeyMode::Tags
        }
    }
}

/// Value deciding whether two songs denote the same logical track
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Normalized tag tuple
    Tags(TagKey),
    /// `track_id` if present, else `remote_id`
    Remote(String),
    /// Song lacks the fields for a key; never equal to a key of another song
    Distinct(usize),
}

impl IdentityKey {
    /// Derive the key of `song` under `mode`
    ///
    /// `ordinal` is the song's position in its collection and only serves
    /// to keep distinct keys apart.
    pub fn derive(song: &Song, mode: KeyMode, ordinal: usize) -> Self {
        let key = match mode {
            KeyMode::Tags => TagKey::from_song(song).map(IdentityKey::Tags),
            KeyMode::Remote => song
                .remote_key()
                .map(|key| IdentityKey::Remote(key.to_string())),
        };

        key.unwrap_or(IdentityKey::Distinct(ordinal))
    }

    /// Whether this key can never match anything
    pub fn is_distinct(&self) -> bool {
        matches!(self, IdentityKey::Distinct(_))
    }
}

/// Normalize tag text for comparison
///
/// Lowercases, drops punctuation, collapses whitespace and strips a leading
/// "the ", because tag formatting differs between encoders and the remote.
pub fn normalize(s: &str) -> String {
    let cleaned: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.strip_prefix("the ") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => collapsed,
    }
}
