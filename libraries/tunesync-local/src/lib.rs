//! tunesync Local Collection
//!
//! Everything that touches the local filesystem during a sync run.
//!
//! # Features
//!
//! - **Scanning**: walk inputs for audio files and read their tags with lofty
//! - **Output paths**: `%token%` templates for downloads and their base directory
//! - **Relocation**: move songs removed remotely aside, prune emptied folders
//! - **Playlists**: atomic M3U file writing with relative entries
//!
//! # Example
//!
//! ```rust,no_run
//! use tunesync_core::{ExcludePatterns, FilterSet};
//! use tunesync_local::LocalScanner;
//! use std::path::PathBuf;
//!
//! let collection = LocalScanner::new()
//!     .max_depth(Some(0))
//!     .scan(&[PathBuf::from("/music")], &ExcludePatterns::none(), &FilterSet::new())?;
//! println!("{} songs to consider", collection.matched.len());
//! # Ok::<(), tunesync_local::LocalError>(())
//! ```

pub mod error;
pub mod metadata;
pub mod path_template;
pub mod playlist_file;
pub mod relocate;
pub mod scanner;

pub use error::{LocalError, Result};
pub use metadata::{read_song, read_song_or_tagless};
pub use path_template::{normalize_path, template_to_base_path, PathTemplate, SUGGESTED};
pub use playlist_file::{build_playlist, playlist_path, relative_entry_path, write_playlist};
pub use relocate::{create_private_dir_all, relocate, remove_empty_dirs};
pub use scanner::{is_audio_file, LocalScanner};
