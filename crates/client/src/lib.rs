//! MF360 Client - REST client for the MF360 CRM backend.
//!
//! Implements [`mf360_core::backend::CrmBackendTrait`] over HTTP. Every call
//! is a single request: no retries, no caching.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use mf360_client::Mf360Client;
//! use mf360_core::backend::CrmBackendTrait;
//!
//! let client = Mf360Client::new("http://localhost:8001", Duration::from_secs(30))?;
//! let investors = client.list_investors(false).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::{api_base_url, Mf360Client};
pub use error::{ClientError, Result};
pub use types::*;
