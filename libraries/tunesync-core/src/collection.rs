//! Three-way partition of a scanned or fetched song set

use crate::filter::{ExcludePatterns, FilterSet, FilterVerdict};
use crate::song::Song;

/// Songs partitioned into disjoint `matched`/`filtered`/`excluded` buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongCollection {
    /// Passes the filters
    pub matched: Vec<Song>,

    /// Fails an include filter or hits an exclude filter
    pub filtered: Vec<Song>,

    /// Hits a path exclusion pattern
    pub excluded: Vec<Song>,
}

impl SongCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection with every song in the `matched` bucket
    pub fn all_matched(songs: Vec<Song>) -> Self {
        Self {
            matched: songs,
            ..Self::default()
        }
    }

    /// Every song, in matched, filtered, excluded order
    pub fn all(&self) -> Vec<Song> {
        self.matched
            .iter()
            .chain(&self.filtered)
            .chain(&self.excluded)
            .cloned()
            .collect()
    }

    /// Matched songs followed by filtered songs
    pub fn matched_and_filtered(&self) -> Vec<Song> {
        self.matched.iter().chain(&self.filtered).cloned().collect()
    }

    /// Total number of songs across buckets
    pub fn len(&self) -> usize {
        self.matched.len() + self.filtered.len() + self.excluded.len()
    }

    /// Whether all buckets are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition songs in a single order-preserving pass
///
/// Path exclusion runs first and short-circuits field filters.
pub fn classify<I>(songs: I, exclude: &ExcludePatterns, filters: &FilterSet) -> SongCollection
where
    I: IntoIterator<Item = Song>,
{
    let mut collection = SongCollection::new();

    for song in songs {
        if exclude.is_excluded(&song) {
            collection.excluded.push(song);
            continue;
        }

        match filters.evaluate(&song) {
            FilterVerdict::Included => collection.matched.push(song),
            FilterVerdict::Filtered => collection.filtered.push(song),
        }
    }

    collection
}
