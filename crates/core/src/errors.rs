//! Core error types for the MF360 application.
//!
//! This module defines transport-agnostic error types. HTTP and decoding
//! errors from the API client are converted to these types by the client
//! crate, so nothing here depends on `reqwest`.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the CRM application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend request failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Text for a transient user-facing notification.
    ///
    /// Server-supplied details and validation messages are shown as-is;
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Backend(BackendError::Api {
                detail: Some(detail),
                ..
            }) => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True when the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Backend(BackendError::Api { status: 404, .. })
        )
    }
}

/// Transport-agnostic error type for backend calls.
///
/// All details are strings so the client crate can convert its HTTP and
/// JSON errors without leaking those types into the core.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// The backend answered `success: false` with a 2xx status.
    #[error("Request was not successful: {0}")]
    Unsuccessful(String),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built (bad token, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Validation errors for user input and data parsing.
///
/// The display text of each variant is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Mobile must be 10 digits")]
    InvalidMobile,

    #[error("Please select an investor first")]
    NoInvestorSelected,

    #[error("{0}")]
    InvalidInput(String),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = Error::Backend(BackendError::Api {
            status: 400,
            detail: Some("Email already registered".to_string()),
        });
        assert_eq!(err.user_message("Signup failed"), "Email already registered");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = Error::Backend(BackendError::Network("connection refused".to_string()));
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let err = Error::Backend(BackendError::Api {
            status: 500,
            detail: None,
        });
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_validation_messages() {
        let err: Error = ValidationError::MissingField("PAN".to_string()).into();
        assert_eq!(err.user_message("ignored"), "PAN is required");
        assert_eq!(
            ValidationError::InvalidMobile.to_string(),
            "Mobile must be 10 digits"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err = Error::Backend(BackendError::Api {
            status: 404,
            detail: Some("Investor not found".to_string()),
        });
        assert!(err.is_not_found());
        assert!(!Error::Session("x".to_string()).is_not_found());
    }
}
