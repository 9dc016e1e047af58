//! Error types for the MF360 client crate.

use mf360_core::errors::{BackendError, Error as CoreError};
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status from the backend
    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// 2xx response carrying `success: false` or no data
    #[error("Unsuccessful response: {0}")]
    Unsuccessful(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status and optional detail
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api { status, detail }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_decode() => BackendError::Decode(e.to_string()),
            ClientError::Http(e) => BackendError::Network(e.to_string()),
            ClientError::Json(e) => BackendError::Decode(e.to_string()),
            ClientError::Api { status, detail } => BackendError::Api { status, detail },
            ClientError::Unsuccessful(msg) => BackendError::Unsuccessful(msg),
            ClientError::InvalidRequest(msg) => BackendError::InvalidRequest(msg),
        }
    }
}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        CoreError::Backend(err.into())
    }
}
