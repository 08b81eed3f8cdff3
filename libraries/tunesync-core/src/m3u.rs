//! Extended M3U playlist payload

const HEADER: &str = "#EXTM3U";
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One playlist track line pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct M3uEntry {
    duration_seconds: u64,
    artist: String,
    title: String,
    path: String,
}

/// In-memory extended M3U playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct M3uPlaylist {
    entries: Vec<M3uEntry>,
}

impl M3uPlaylist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track; unknown duration is written as `0`
    pub fn push(
        &mut self,
        duration_seconds: Option<u64>,
        artist: Option<&str>,
        title: Option<&str>,
        path: impl Into<String>,
    ) {
        self.entries.push(M3uEntry {
            duration_seconds: duration_seconds.unwrap_or(0),
            artist: artist.unwrap_or_default().to_string(),
            title: title.unwrap_or_default().to_string(),
            path: path.into(),
        });
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File contents prefixed with a UTF-8 byte order mark
    pub fn to_bytes(&self) -> Vec<u8> {
        let text = self.to_string();
        let mut bytes = Vec::with_capacity(BOM.len() + text.len());
        bytes.extend_from_slice(BOM);
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }
}

impl std::fmt::Display for M3uPlaylist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(HEADER)?;
        for entry in &self.entries {
            write!(
                f,
                "\n#EXTINF,{},{} - {}\n{}",
                entry.duration_seconds, entry.artist, entry.title, entry.path
            )?;
        }
        Ok(())
    }
}
