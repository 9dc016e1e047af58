//! Dashboard cards: investor totals plus server-side SIP analytics.

mod dashboard_calculator;
mod dashboard_model;
mod dashboard_service;

#[cfg(test)]
mod dashboard_service_tests;

pub use dashboard_calculator::compute_dashboard_stats;
pub use dashboard_model::*;
pub use dashboard_service::{
    DashboardService, DashboardServiceTrait, DASHBOARD_LOAD_FAILED, SEED_FAILED, SEED_IN_PROGRESS,
};
