//! Collection comparison
//!
//! One direction at a time: `missing(a, b)` lists what `a` has that `b`
//! lacks. Upload, download and removal detection are all this function
//! with different arguments.

use crate::identity::{IdentityKey, KeyMode};
use crate::song::Song;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Songs of `source` with no identity match in `target`, in source order
///
/// Songs without a derivable key are always reported.
pub fn missing(source: &[Song], target: &[Song]) -> Vec<Song> {
    let mode = KeyMode::between(source, target);

    let target_keys: HashSet<IdentityKey> = target
        .iter()
        .enumerate()
        .map(|(i, song)| IdentityKey::derive(song, mode, i))
        .filter(|key| !key.is_distinct())
        .collect();

    let result: Vec<Song> = source
        .iter()
        .enumerate()
        .filter(|(i, song)| {
            let key = IdentityKey::derive(song, mode, *i);
            key.is_distinct() || !target_keys.contains(&key)
        })
        .map(|(_, song)| song.clone())
        .collect();

    tracing::debug!(
        source = source.len(),
        target = target.len(),
        missing = result.len(),
        ?mode,
        "Compared collections"
    );

    result
}

/// Sort for transfer by `(artist, album, track_number)`, unset values first
pub fn sort_for_transfer(songs: &mut [Song]) {
    songs.sort_by(transfer_order);
}

/// Sort by local path; songs without a path sort first
pub fn sort_by_path(songs: &mut [Song]) {
    songs.sort_by(|a, b| a.local_path().cmp(&b.local_path()));
}

fn transfer_order(a: &Song, b: &Song) -> Ordering {
    a.artist
        .cmp(&b.artist)
        .then_with(|| a.album.cmp(&b.album))
        .then_with(|| a.track_number.cmp(&b.track_number))
}
