//! Token endpoints of the music library service.

use crate::error::{ClientError, Result};
use crate::types::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Client for obtaining and renewing access tokens.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Exchange a username and password for a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        debug!(username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .post("login", &request, || {
                ClientError::AuthFailed("Invalid username or password".to_string())
            })
            .await?;

        info!(username = %response.username, "Login successful");
        Ok(response)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        debug!("Refreshing access token");

        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .post("refresh", &request, || {
                ClientError::TokenRefreshFailed("Refresh token expired or invalid".to_string())
            })
            .await?;

        debug!("Token refresh successful");
        Ok(response)
    }

    /// POST `body` to `/api/auth/{endpoint}`; a 401 becomes `rejected()`.
    async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        rejected: impl FnOnce() -> ClientError,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/api/auth/{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let error = rejected();
            warn!(endpoint = %endpoint, error = %error, "Credentials rejected");
            return Err(error);
        }
        if !status.is_success() {
            return Err(ClientError::from_response(response).await);
        }

        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}
