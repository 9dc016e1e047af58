//! Request and response payloads for the CRM backend.

use serde::{Deserialize, Serialize};

use crate::utils::serde_utils::{lenient_count, lenient_optional_count, lenient_string};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SignupRequest {
    /// Credentials for the automatic login that follows a signup.
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Result of `GET /seed/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedStatus {
    pub seeded: bool,
    #[serde(deserialize_with = "lenient_count")]
    pub investor_count: u64,
}

/// Result of `POST /seed/run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedRunResult {
    pub success: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_optional_count")]
    pub count: Option<u64>,
}
