//! Seam between the CRM workflows and the REST backend.

mod backend_model;
mod backend_traits;

pub use backend_model::*;
pub use backend_traits::CrmBackendTrait;

#[cfg(test)]
pub(crate) mod mock_backend;
