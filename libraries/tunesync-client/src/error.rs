//! Error types for the tunesync client.

use thiserror::Error;

/// Errors that can occur when talking to the music library service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no valid token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error during upload/download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Downloaded file could not be moved into place
    #[error("Failed to persist download: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Stored credentials could not be read or written
    #[error("Credential store error: {0}")]
    Credentials(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Rate limited by server
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

impl ClientError {
    /// Whether this error means the session is not (or no longer) authenticated
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::AuthRequired
                | ClientError::AuthFailed(_)
                | ClientError::TokenRefreshFailed(_)
        )
    }

    /// Map a non-success response to an error
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();

        match status.as_u16() {
            401 => ClientError::AuthRequired,
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                ClientError::RateLimited {
                    retry_after_secs: retry_after,
                }
            }
            code => ClientError::ServerError {
                status: code,
                message: response.text().await.unwrap_or_default(),
            },
        }
    }

    /// Map a transport failure, singling out an unreachable server
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
