//! Output path templates for downloaded songs
//!
//! Templates are plain paths with `%token%` placeholders, e.g.
//! `~/Music/%albumartist%/%album%/%track2% - %title%`.
//!
//! # Available Placeholders
//!
//! | Placeholder | Description | Fallback |
//! |-------------|-------------|----------|
//! | `%artist%` | Track artist | "Unknown Artist" |
//! | `%albumartist%` | Album artist | Falls back to `%artist%` |
//! | `%album%` | Album title | "Unknown Album" |
//! | `%title%` | Track title | "Unknown Title" |
//! | `%track%` | Track number | "0" |
//! | `%track2%` | Track number (zero-padded) | "00" |
//! | `%disc%` | Disc number | "0" |
//! | `%disc2%` | Disc number (zero-padded) | "00" |
//! | `%date%`, `%year%` | Release year | "0" |

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tunesync_core::Song;

/// Sentinel asking for the default layout under the working directory
pub const SUGGESTED: &str = "%suggested%";

/// Layout used for the sentinel and for token-free directory templates
pub const DEFAULT_LAYOUT: &str = "%albumartist%/%album%/%track2% - %title%";

/// Resolved output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// Absolute template with placeholders
    template: PathBuf,
    /// Whether the default layout under the working directory is used
    suggested: bool,
    cwd: PathBuf,
}

impl PathTemplate {
    /// Parse a user template relative to `cwd`
    ///
    /// The sentinel, or a template naming `cwd` itself, selects the default
    /// layout under `cwd`. Any other template without placeholders is taken
    /// as a directory to lay the default layout out in.
    pub fn parse(template: &str, cwd: &Path) -> Self {
        let cwd = normalize_path(cwd);
        let suggested = template == SUGGESTED || normalize_path(&cwd.join(template)) == cwd;

        let template = if suggested {
            cwd.join(DEFAULT_LAYOUT)
        } else {
            let path = normalize_path(&cwd.join(template));
            if has_tokens(template) {
                path
            } else {
                path.join(DEFAULT_LAYOUT)
            }
        };

        Self {
            template,
            suggested,
            cwd,
        }
    }

    /// Get the template path
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Whether this is the default layout under the working directory
    pub fn is_suggested(&self) -> bool {
        self.suggested
    }

    /// Resolve the template for a song, without extension
    pub fn resolve(&self, song: &Song) -> PathBuf {
        self.template
            .components()
            .map(|component| match component {
                Component::Normal(part) => {
                    OsString::from(resolve_component(&part.to_string_lossy(), song))
                }
                other => other.as_os_str().to_os_string(),
            })
            .collect()
    }

    /// Resolve the template for a song and append `extension`
    pub fn resolve_with_extension(&self, song: &Song, extension: &str) -> PathBuf {
        let mut path = self.resolve(song).into_os_string();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }

    /// Base directory holding every song this template produces
    ///
    /// The working directory for the default layout; otherwise the deepest
    /// directory shared by all resolved song paths. Without songs, the
    /// leading part of the template that has no placeholders.
    pub fn base_path(&self, songs: &[Song]) -> PathBuf {
        if self.suggested {
            return self.cwd.clone();
        }

        let parents: Vec<PathBuf> = songs
            .iter()
            .filter_map(|song| self.resolve(song).parent().map(Path::to_path_buf))
            .collect();

        match parents.split_first() {
            Some((first, rest)) => rest
                .iter()
                .fold(first.clone(), |common, path| common_prefix(&common, path)),
            None => self.static_prefix(),
        }
    }

    fn static_prefix(&self) -> PathBuf {
        let Some(parent) = self.template.parent() else {
            return self.template.clone();
        };

        parent
            .components()
            .take_while(|component| !has_tokens(&component.as_os_str().to_string_lossy()))
            .collect()
    }
}

/// Resolve `.` and `..` components without touching the filesystem
///
/// A `..` directly below the root stays at the root; leading `..` of a
/// relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::CurDir | Component::ParentDir) | None => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Base output directory for `songs` under `template`
pub fn template_to_base_path(template: &PathTemplate, songs: &[Song]) -> PathBuf {
    template.base_path(songs)
}

fn has_tokens(s: &str) -> bool {
    TOKENS.iter().any(|token| s.contains(token))
}

const TOKENS: &[&str] = &[
    "%artist%",
    "%albumartist%",
    "%album%",
    "%title%",
    "%track%",
    "%track2%",
    "%disc%",
    "%disc2%",
    "%date%",
    "%year%",
];

/// Substitute the placeholders of a single path component
fn resolve_component(component: &str, song: &Song) -> String {
    if !has_tokens(component) {
        return component.to_string();
    }

    let mut resolved = component.to_string();
    resolved = resolve_placeholder(&resolved, "%albumartist%", || album_artist(song));
    resolved = resolve_placeholder(&resolved, "%artist%", || {
        text(song.artist.as_deref(), "Unknown Artist")
    });
    resolved = resolve_placeholder(&resolved, "%album%", || {
        text(song.album.as_deref(), "Unknown Album")
    });
    resolved = resolve_placeholder(&resolved, "%title%", || {
        text(song.title.as_deref(), "Unknown Title")
    });
    resolved = resolve_placeholder(&resolved, "%track2%", || padded(song.track_number));
    resolved = resolve_placeholder(&resolved, "%track%", || number(song.track_number));
    resolved = resolve_placeholder(&resolved, "%disc2%", || padded(song.disc_number));
    resolved = resolve_placeholder(&resolved, "%disc%", || number(song.disc_number));
    resolved = resolve_placeholder(&resolved, "%date%", || year(song));
    resolved = resolve_placeholder(&resolved, "%year%", || year(song));
    resolved
}

fn resolve_placeholder<F>(template: &str, placeholder: &str, value_fn: F) -> String
where
    F: FnOnce() -> String,
{
    if template.contains(placeholder) {
        template.replace(placeholder, &sanitize_path_component(&value_fn()))
    } else {
        template.to_string()
    }
}

fn album_artist(song: &Song) -> String {
    song.album_artist
        .as_deref()
        .or(song.artist.as_deref())
        .unwrap_or("Unknown Artist")
        .to_string()
}

fn text(value: Option<&str>, fallback: &str) -> String {
    value.unwrap_or(fallback).to_string()
}

fn number(value: Option<u32>) -> String {
    value.unwrap_or(0).to_string()
}

fn padded(value: Option<u32>) -> String {
    format!("{:02}", value.unwrap_or(0))
}

fn year(song: &Song) -> String {
    song.year.unwrap_or(0).to_string()
}

fn common_prefix(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

/// Sanitize a single path component for filesystem safety
///
/// Removes/replaces characters that are invalid on common filesystems
pub fn sanitize_path_component(s: &str) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| match c {
            // Invalid on Windows: < > : " / \ | ? *
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Windows rejects trailing dots
    let trimmed = sanitized.trim().trim_end_matches('.');

    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
