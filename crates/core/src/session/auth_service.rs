use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::{SessionContext, UserSession};
use crate::backend::{CrmBackendTrait, LoginRequest, SignupRequest};
use crate::errors::Result;

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_SUCCEEDED: &str = "Account created successfully!";
pub const SIGNUP_FAILED: &str = "Signup failed";

#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, credentials: LoginRequest) -> Result<UserSession>;

    /// Registers the account, then signs in with the same credentials.
    async fn signup(&self, request: SignupRequest) -> Result<UserSession>;

    fn logout(&self) -> Result<()>;
}

pub struct AuthService {
    backend: Arc<dyn CrmBackendTrait>,
    session: Arc<SessionContext>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn CrmBackendTrait>, session: Arc<SessionContext>) -> Self {
        Self { backend, session }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, credentials: LoginRequest) -> Result<UserSession> {
        debug!("Logging in as {}", credentials.email);
        let user = self.backend.login(&credentials).await?;
        self.session.save(user.clone())?;
        info!("Signed in as {}", user.display_name());
        Ok(user)
    }

    async fn signup(&self, request: SignupRequest) -> Result<UserSession> {
        self.backend.signup(&request).await?;
        self.login(request.login_request()).await
    }

    fn logout(&self) -> Result<()> {
        self.session.clear()
    }
}
