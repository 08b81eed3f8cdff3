//! Moving removed songs aside and pruning emptied folders

use crate::{LocalError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Create a directory and its parents, private to the current user on unix
pub fn create_private_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path)
}

/// Move `path` into `removed_dir`, mirroring its location under `input_root`
///
/// Falls back to copy-then-rename when a plain rename fails (e.g. across
/// filesystems), so the destination only ever holds a complete file.
pub fn relocate(path: &Path, input_root: &Path, removed_dir: &Path) -> Result<PathBuf> {
    let relative = match path.strip_prefix(input_root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.file_name().map(PathBuf::from).ok_or_else(|| {
            LocalError::InvalidPath(format!("{} has no file name", path.display()))
        })?,
    };

    let destination = removed_dir.join(&relative);
    let parent = destination.parent().unwrap_or(removed_dir);
    create_private_dir_all(parent)?;

    if let Err(e) = fs::rename(path, &destination) {
        tracing::debug!(
            from = %path.display(),
            to = %destination.display(),
            error = %e,
            "Rename failed, copying instead"
        );

        let mut source = fs::File::open(path)?;
        let mut temp = NamedTempFile::new_in(parent)?;
        io::copy(&mut source, &mut temp)?;
        temp.persist(&destination)?;
        fs::remove_file(path)?;
    }

    tracing::info!(path = %relative.display(), "Moved removed song");
    Ok(destination)
}

/// Remove empty directories below `root`, deepest first
///
/// `root` itself is only removed when `remove_root` is set. Returns whether
/// `root` was removed.
pub fn remove_empty_dirs(root: &Path, remove_root: bool) -> Result<bool> {
    if !root.is_dir() {
        return Ok(false);
    }

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            remove_empty_dirs(&path, true)?;
        }
    }

    if remove_root && fs::read_dir(root)?.next().is_none() {
        tracing::info!(path = %root.display(), "Removing empty folder");
        fs::remove_dir(root)?;
        return Ok(true);
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relocation_mirrors_relative_path() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("music");
        let removed = temp.path().join("removed");
        let song = input.join("Artist").join("Album").join("01.mp3");
        fs::create_dir_all(song.parent().unwrap()).unwrap();
        fs::write(&song, b"audio").unwrap();

        let moved = relocate(&song, &input, &removed).unwrap();

        assert_eq!(moved, removed.join("Artist").join("Album").join("01.mp3"));
        assert!(!song.exists());
        assert_eq!(fs::read(&moved).unwrap(), b"audio");
    }

    #[test]
    fn file_outside_root_keeps_its_name() {
        let temp = TempDir::new().unwrap();
        let song = temp.path().join("elsewhere.mp3");
        fs::write(&song, b"audio").unwrap();

        let moved = relocate(&song, &temp.path().join("music"), &temp.path().join("removed"))
            .unwrap();
        assert_eq!(moved, temp.path().join("removed").join("elsewhere.mp3"));
    }

    #[test]
    fn empty_dirs_are_pruned_bottom_up() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("music");
        fs::create_dir_all(root.join("a").join("b").join("c")).unwrap();
        fs::create_dir_all(root.join("keep")).unwrap();
        fs::write(root.join("keep").join("song.mp3"), b"audio").unwrap();

        let removed = remove_empty_dirs(&root, false).unwrap();

        assert!(!removed);
        assert!(root.exists());
        assert!(!root.join("a").exists());
        assert!(root.join("keep").join("song.mp3").exists());
    }

    #[test]
    fn empty_root_removed_only_when_asked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("empty");
        fs::create_dir(&root).unwrap();

        assert!(!remove_empty_dirs(&root, false).unwrap());
        assert!(root.exists());
        assert!(remove_empty_dirs(&root, true).unwrap());
        assert!(!root.exists());
        assert!(!remove_empty_dirs(&root, true).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn private_dirs_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("private").join("nested");
        create_private_dir_all(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
