//! Local collection scanning

use crate::metadata::read_song_or_tagless;
use crate::{LocalError, Result};
use std::path::{Path, PathBuf};
use tunesync_core::{classify, ExcludePatterns, FilterSet, SongCollection};
use walkdir::WalkDir;

/// Supported audio file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Scanner turning input paths into a classified [`SongCollection`]
#[derive(Debug, Clone, Default)]
pub struct LocalScanner {
    /// Directory levels to descend below each input (`None` for unlimited)
    max_depth: Option<usize>,

    /// Directories whose contents are never scanned
    skipped: Vec<PathBuf>,
}

impl LocalScanner {
    /// Create a new scanner with unlimited recursion
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit recursion; `Some(0)` scans only files directly inside each input
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Leave `dir` and everything below it out of the scan
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skipped.push(dir.into());
        self
    }

    fn is_skipped(&self, path: &Path) -> bool {
        self.skipped.iter().any(|dir| path.starts_with(dir))
    }

    /// Collect audio file paths from files and directories
    ///
    /// Inputs that do not exist are skipped, since a download target may
    /// not have been created yet.
    pub fn scan_paths(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            if !input.exists() {
                tracing::debug!(path = %input.display(), "Input does not exist, skipping");
                continue;
            }

            if self.is_skipped(input) {
                tracing::debug!(path = %input.display(), "Input is skipped");
                continue;
            }

            if input.is_file() {
                if is_audio_file(input) {
                    files.push(input.clone());
                }
                continue;
            }

            files.extend(self.scan_directory(input)?);
        }

        Ok(files)
    }

    /// Scan inputs, read tags and classify the songs
    pub fn scan(
        &self,
        inputs: &[PathBuf],
        exclude: &ExcludePatterns,
        filters: &FilterSet,
    ) -> Result<SongCollection> {
        let files = self.scan_paths(inputs)?;
        tracing::debug!(files = files.len(), "Reading local tags");

        let songs = files.iter().map(|path| read_song_or_tagless(path));
        let collection = classify(songs, exclude, filters);

        tracing::info!(
            matched = collection.matched.len(),
            filtered = collection.filtered.len(),
            excluded = collection.excluded.len(),
            "Scanned local songs"
        );

        Ok(collection)
    }

    fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.is_dir() {
            return Err(LocalError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path).sort_by_file_name();

        // walkdir counts the input itself as depth 0
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth.saturating_add(1));
        }

        let mut audio_files = Vec::new();
        for entry in walker
            .into_iter()
            .filter_entry(|entry| !self.is_skipped(entry.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && is_audio_file(entry.path()) {
                audio_files.push(entry.into_path());
            }
        }

        Ok(audio_files)
    }
}

/// Check if a file is a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn library() -> TempDir {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("b.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("a.flac"), b"fake flac").unwrap();
        fs::write(base.join("readme.txt"), b"not audio").unwrap();

        let nested = base.join("artist").join("album");
        fs::create_dir_all(&nested).unwrap();
        fs::write(base.join("artist").join("c.ogg"), b"fake ogg").unwrap();
        fs::write(nested.join("d.mp3"), b"fake mp3").unwrap();

        temp
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("test.mp3")));
        assert!(is_audio_file(Path::new("test.MP3")));
        assert!(is_audio_file(Path::new("test.m4a")));
        assert!(!is_audio_file(Path::new("test.txt")));
        assert!(!is_audio_file(Path::new("test")));
    }

    #[test]
    fn scans_recursively_in_name_order() {
        let temp = library();
        let files = LocalScanner::new()
            .scan_paths(&[temp.path().to_path_buf()])
            .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.flac", "d.mp3", "c.ogg", "b.mp3"]);
    }

    #[test]
    fn depth_zero_stays_in_the_input_directory() {
        let temp = library();
        let files = LocalScanner::new()
            .max_depth(Some(0))
            .scan_paths(&[temp.path().to_path_buf()])
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.parent() == Some(temp.path())));
    }

    #[test]
    fn depth_one_descends_one_level() {
        let temp = library();
        let files = LocalScanner::new()
            .max_depth(Some(1))
            .scan_paths(&[temp.path().to_path_buf()])
            .unwrap();

        assert_eq!(files.len(), 3);
        assert!(!files.iter().any(|p| p.ends_with("d.mp3")));
    }

    #[test]
    fn accepts_files_and_skips_missing_inputs() {
        let temp = library();
        let inputs = vec![
            temp.path().join("b.mp3"),
            temp.path().join("readme.txt"),
            temp.path().join("does-not-exist"),
        ];
        let files = LocalScanner::new().scan_paths(&inputs).unwrap();
        assert_eq!(files, vec![temp.path().join("b.mp3")]);
    }

    #[test]
    fn skipped_dirs_are_not_descended() {
        let temp = library();
        let files = LocalScanner::new()
            .skip_dir(temp.path().join("artist"))
            .scan_paths(&[temp.path().to_path_buf(), temp.path().join("artist/c.ogg")])
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.parent() == Some(temp.path())));
    }

    #[test]
    fn scan_classifies_by_path() {
        let temp = library();
        let exclude = ExcludePatterns::parse(&["artist".to_string()]).unwrap();

        let collection = LocalScanner::new()
            .scan(&[temp.path().to_path_buf()], &exclude, &FilterSet::new())
            .unwrap();

        assert_eq!(collection.matched.len(), 2);
        assert_eq!(collection.excluded.len(), 2);
        assert!(collection.filtered.is_empty());
    }
}
