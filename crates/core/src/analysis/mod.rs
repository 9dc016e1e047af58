//! AI analysis results as returned by the backend.

mod analysis_model;

pub use analysis_model::*;
