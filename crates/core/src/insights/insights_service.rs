use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};

use super::{compute_aggregate_insights, AggregateInsights};
use crate::analysis::{AiRunResult, CachedAnalysis};
use crate::backend::CrmBackendTrait;
use crate::errors::{Result, ValidationError};
use crate::notifications::{Loaded, Notice};

pub const ANALYSIS_FAILED: &str = "Failed to run AI analysis";
pub const ANALYSIS_RUNNING: &str = "Running comprehensive AI analysis...";
pub const ANALYSIS_COMPLETED: &str = "AI analysis completed!";

#[async_trait]
pub trait InsightsServiceTrait: Send + Sync {
    /// Loads every investor with holdings and aggregates the book.
    async fn load_aggregate(&self) -> Result<AggregateInsights>;

    /// Runs the backend analysis for the selected investor.
    async fn run_analysis(&self, investor_id: Option<&str>) -> Result<Loaded<AiRunResult>>;

    /// Last stored analysis, or `None` if it was never run.
    async fn cached_analysis(&self, investor_id: &str) -> Result<Option<CachedAnalysis>>;
}

pub struct InsightsService {
    backend: Arc<dyn CrmBackendTrait>,
}

impl InsightsService {
    pub fn new(backend: Arc<dyn CrmBackendTrait>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl InsightsServiceTrait for InsightsService {
    async fn load_aggregate(&self) -> Result<AggregateInsights> {
        let investors = self.backend.list_investors(true).await.map_err(|e| {
            error!("Error loading investors for insights: {}", e);
            e
        })?;
        debug!("Aggregating {} investors", investors.len());
        Ok(compute_aggregate_insights(&investors, Utc::now()))
    }

    async fn run_analysis(&self, investor_id: Option<&str>) -> Result<Loaded<AiRunResult>> {
        let investor_id = match investor_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ValidationError::NoInvestorSelected.into()),
        };

        let result = self.backend.run_analysis(investor_id).await.map_err(|e| {
            error!("AI analysis failed for {}: {}", investor_id, e);
            e
        })?;
        Ok(Loaded::new(result)
            .with_notice(Notice::info(ANALYSIS_RUNNING))
            .with_notice(Notice::success(ANALYSIS_COMPLETED)))
    }

    async fn cached_analysis(&self, investor_id: &str) -> Result<Option<CachedAnalysis>> {
        match self.backend.cached_analysis(investor_id).await {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }
}
