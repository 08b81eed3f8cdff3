//! Writing M3U playlist files next to the downloaded library

use crate::path_template::{normalize_path, sanitize_path_component, PathTemplate};
use crate::relocate::create_private_dir_all;
use crate::Result;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tunesync_core::{M3uPlaylist, Song};

/// Path of the playlist file for `name` inside `dir`
pub fn playlist_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.m3u", sanitize_path_component(name)))
}

/// Build an M3U playlist whose entries point at where `template` puts each song
pub fn build_playlist(
    songs: &[Song],
    template: &PathTemplate,
    playlist_dir: &Path,
    extension: &str,
) -> M3uPlaylist {
    let mut playlist = M3uPlaylist::new();

    for song in songs {
        let target = template.resolve_with_extension(song, extension);
        let entry = relative_entry_path(&target, playlist_dir);
        playlist.push(
            song.duration_seconds,
            song.artist.as_deref(),
            song.title.as_deref(),
            entry.to_string_lossy(),
        );
    }

    playlist
}

/// Write `playlist` to `<dir>/<name>.m3u`, replacing any previous file atomically
pub fn write_playlist(dir: &Path, name: &str, playlist: &M3uPlaylist) -> Result<PathBuf> {
    create_private_dir_all(dir)?;
    let path = playlist_path(dir, name);

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&playlist.to_bytes())?;
    temp.flush()?;
    temp.persist(&path)?;

    tracing::debug!(path = %path.display(), tracks = playlist.len(), "Wrote playlist");
    Ok(path)
}

/// Path of `target` relative to the directory `from`
///
/// Both paths are expected to be absolute. They are normalized first, then
/// every component of `from` not shared with `target` becomes a `..`.
pub fn relative_entry_path(target: &Path, from: &Path) -> PathBuf {
    let target = normalize_path(target);
    let from = normalize_path(from);
    let target: Vec<Component<'_>> = target.components().collect();
    let from: Vec<Component<'_>> = from.components().collect();

    let shared = target
        .iter()
        .zip(&from)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..from.len() {
        relative.push("..");
    }
    for component in &target[shared..] {
        relative.push(component.as_os_str());
    }

    relative
}
