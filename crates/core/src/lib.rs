//! MF360 Core - Domain models, aggregation and page workflows.
//!
//! This crate holds the investor CRM's business logic. It is transport
//! agnostic: REST access goes through [`backend::CrmBackendTrait`], which is
//! implemented over HTTP by the `mf360-client` crate.

pub mod analysis;
pub mod backend;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod insights;
pub mod investors;
pub mod notifications;
pub mod session;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
