//! Signed-in user: model, persistence and the login/signup/logout flows.

mod auth_service;
mod session_context;
mod session_model;
mod session_store;

pub use auth_service::{
    AuthService, AuthServiceTrait, LOGIN_FAILED, LOGIN_SUCCEEDED, SIGNUP_FAILED, SIGNUP_SUCCEEDED,
};
pub use session_context::SessionContext;
pub use session_model::UserSession;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStoreTrait};
