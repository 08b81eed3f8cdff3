//! Layered configuration: TOML file, then `TUNESYNC_*` environment variables.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tunesync_core::FAVORITES_PLAYLIST_NAME;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tunesync.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default = "default_sync")]
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthSettings {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    #[serde(default = "default_favorites_name")]
    pub favorites_name: String,

    /// Extension given to downloaded files and playlist entries
    #[serde(default = "default_audio_extension")]
    pub audio_extension: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tunesync.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // e.g. TUNESYNC_SERVER__URL, TUNESYNC_AUTH__PASSWORD
        settings = settings.add_source(
            config::Environment::with_prefix("TUNESYNC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(SyncError::Config(
                "Server URL is required (set TUNESYNC_SERVER__URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::Config(format!(
                "Server URL must start with http:// or https://, got {:?}",
                url
            )));
        }

        if self.sync.favorites_name.trim().is_empty() {
            return Err(SyncError::Config(
                "Favorites playlist name cannot be empty".to_string(),
            ));
        }

        let ext = &self.sync.audio_extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(SyncError::Config(format!(
                "Invalid audio extension {:?}",
                ext
            )));
        }

        if self.auth.username.is_some() && self.auth.password.is_none() {
            return Err(SyncError::Config(
                "A username needs a password (set TUNESYNC_AUTH__PASSWORD)".to_string(),
            ));
        }

        Ok(())
    }

    /// Username and password, when both are configured
    pub fn login(&self) -> Option<(&str, &str)> {
        self.auth
            .username
            .as_deref()
            .zip(self.auth.password.as_deref())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings { url: default_url() }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_sync() -> SyncSettings {
    SyncSettings {
        favorites_name: default_favorites_name(),
        audio_extension: default_audio_extension(),
    }
}

fn default_favorites_name() -> String {
    FAVORITES_PLAYLIST_NAME.to_string()
}

fn default_audio_extension() -> String {
    "mp3".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            auth: AuthSettings::default(),
            sync: default_sync(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sync.favorites_name, "___auto_favorites___");
        assert_eq!(config.sync.audio_extension, "mp3");
        assert!(config.login().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tunesync.toml");
        std::fs::write(
            &path,
            r#"
[server]
url = "https://music.example.com"

[auth]
username = "user"
password = "secret"

[sync]
favorites_name = "Loved"
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.server.url, "https://music.example.com");
        assert_eq!(config.login(), Some(("user", "secret")));
        assert_eq!(config.sync.favorites_name, "Loved");
        assert_eq!(config.sync.audio_extension, "mp3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sync.audio_extension = ".mp3".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.auth.username = Some("user".to_string());
        assert!(config.validate().is_err());
    }
}
