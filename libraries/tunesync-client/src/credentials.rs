//! On-disk credential cache and session bootstrap.

use crate::client::TuneSyncClient;
use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Tokens persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Directory of named credential files.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Store under the user's configuration directory.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| {
                ClientError::Credentials("No configuration directory available".into())
            })?
            .join("tunesync");
        Ok(Self::new(dir))
    }

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the credential file for `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.cred", name))
    }

    /// Load credentials, `None` if nothing is stored under `name`.
    pub fn load(&self, name: &str) -> Result<Option<StoredCredentials>> {
        let path = self.path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map(Some).map_err(|e| {
            ClientError::Credentials(format!("{}: {}", path.display(), e))
        })
    }

    /// Save credentials, replacing any stored under `name`.
    pub fn save(&self, name: &str, credentials: &StoredCredentials) -> Result<()> {
        create_private_dir(&self.dir)?;

        let json = serde_json::to_vec_pretty(credentials)
            .map_err(|e| ClientError::Credentials(e.to_string()))?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(&json)?;
        temp.persist(self.path(name))?;

        debug!(name = %name, dir = %self.dir.display(), "Saved credentials");
        Ok(())
    }
}

fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Establish an authenticated session.
///
/// Stored tokens are tried first and checked with a cheap authenticated
/// call; a rejected token is refreshed. Otherwise `login` (username,
/// password) is used. Working tokens are written back to the store.
pub async fn authenticate(
    client: &TuneSyncClient,
    store: &CredentialStore,
    name: &str,
    login: Option<(&str, &str)>,
) -> Result<()> {
    if let Some(stored) = store.load(name)? {
        client
            .set_tokens(stored.access_token.clone(), stored.refresh_token.clone())
            .await;

        match check_session(client).await {
            Ok(()) => {
                debug!(name = %name, "Stored credentials accepted");
                return Ok(());
            }
            Err(e) if e.is_auth_error() => {
                if stored.refresh_token.is_some() {
                    match client.refresh_token().await {
                        Ok(_) => {
                            save_session(client, store, name, stored.username).await?;
                            info!(name = %name, "Refreshed stored credentials");
                            return Ok(());
                        }
                        Err(e) if e.is_auth_error() => {
                            warn!(name = %name, "Stored credentials expired");
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            Err(e) => return Err(e),
        }

        client.logout().await;
    }

    let Some((username, password)) = login else {
        return Err(ClientError::AuthRequired);
    };

    let response = client.login(username, password).await?;
    save_session(client, store, name, Some(response.username)).await
}

async fn check_session(client: &TuneSyncClient) -> Result<()> {
    client.mobile().await?.client().registered_devices().await?;
    Ok(())
}

async fn save_session(
    client: &TuneSyncClient,
    store: &CredentialStore,
    name: &str,
    username: Option<String>,
) -> Result<()> {
    let (access_token, refresh_token) = client.get_tokens().await;
    let access_token = access_token.ok_or(ClientError::AuthRequired)?;

    store.save(
        name,
        &StoredCredentials {
            access_token,
            refresh_token,
            username,
        },
    )
}
