//! Book-wide aggregates and the per-investor AI analysis flow.

mod insights_calculator;
mod insights_model;
mod insights_service;

pub use insights_calculator::{
    aum_bin, compute_aggregate_insights, group_sum_first_seen, percentage_of, performance_bin,
    AUM_BINS, PERFORMANCE_BINS,
};
pub use insights_model::*;
pub use insights_service::{
    InsightsService, InsightsServiceTrait, ANALYSIS_COMPLETED, ANALYSIS_FAILED, ANALYSIS_RUNNING,
};
