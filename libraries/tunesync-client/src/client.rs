//! Main client for the music library service.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::manager::ManagerClient;
use crate::mobile::MobileClient;
use crate::types::{ClientConfig, LoginResponse, RefreshTokenResponse};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

/// Client for both views of a cloud music library account.
///
/// Holds the session tokens and hands out short-lived per-view clients.
///
/// # Example
///
/// ```ignore
/// use tunesync_client::{ClientConfig, TuneSyncClient};
///
/// let client = TuneSyncClient::new(ClientConfig::new("https://music.example.com"))?;
/// client.login("user", "password").await?;
///
/// let songs = client.manager().await?.client().list_songs().await?;
/// println!("{} songs in the account", songs.len());
/// ```
pub struct TuneSyncClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl TuneSyncClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("tunesync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                access_token: config.access_token,
                refresh_token: config.refresh_token,
            })),
        })
    }

    /// Get the service URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Login with username and password.
    ///
    /// On success, the tokens are stored for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url().await;

        let response = AuthClient::new(&self.http, &url)
            .login(username, password)
            .await?;

        let mut config = self.config.write().await;
        config.access_token = Some(response.access_token.clone());
        config.refresh_token = Some(response.refresh_token.clone());

        Ok(response)
    }

    /// Set tokens directly (e.g., from stored credentials).
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token);
        config.refresh_token = refresh_token;
    }

    /// Get the current tokens.
    pub async fn get_tokens(&self) -> (Option<String>, Option<String>) {
        let config = self.config.read().await;
        (config.access_token.clone(), config.refresh_token.clone())
    }

    /// Clear stored tokens.
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        config.refresh_token = None;
        info!("Logged out");
    }

    /// Refresh the access token using the refresh token.
    pub async fn refresh_token(&self) -> Result<RefreshTokenResponse> {
        let config = self.config.read().await;
        let refresh_token = config
            .refresh_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        let response = AuthClient::new(&self.http, &url)
            .refresh_token(&refresh_token)
            .await?;

        let mut config = self.config.write().await;
        config.access_token = Some(response.access_token.clone());
        config.refresh_token = Some(response.refresh_token.clone());

        Ok(response)
    }

    /// Get a handle for the music-manager view.
    ///
    /// Returns an error if not authenticated.
    pub async fn manager(&self) -> Result<ManagerClientHandle> {
        let (url, access_token) = self.session().await?;
        Ok(ManagerClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    /// Get a handle for the mobile-client view.
    ///
    /// Returns an error if not authenticated.
    pub async fn mobile(&self) -> Result<MobileClientHandle> {
        let (url, access_token) = self.session().await?;
        Ok(MobileClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }

    /// Execute an operation with automatic token refresh on 401.
    ///
    /// If the operation fails with `AuthRequired`, attempts to refresh
    /// the token and retry once.
    pub async fn with_auto_refresh<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        match operation().await {
            Ok(result) => Ok(result),
            Err(ClientError::AuthRequired) => {
                warn!("Token expired, attempting refresh");
                self.refresh_token().await?;
                operation().await
            }
            Err(e) => Err(e),
        }
    }

    async fn session(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), access_token))
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Handle for music-manager operations.
pub struct ManagerClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl ManagerClientHandle {
    /// Get the manager client.
    pub fn client(&self) -> ManagerClient<'_> {
        ManagerClient::new(&self.http, &self.url, &self.access_token)
    }
}

/// Handle for mobile-client operations.
pub struct MobileClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl MobileClientHandle {
    /// Get the mobile client.
    pub fn client(&self) -> MobileClient<'_> {
        MobileClient::new(&self.http, &self.url, &self.access_token)
    }
}
