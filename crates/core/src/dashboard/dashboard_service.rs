use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};

use super::{compute_dashboard_stats, DashboardView};
use crate::backend::CrmBackendTrait;
use crate::errors::{BackendError, Error, Result};
use crate::notifications::{Loaded, Notice};

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data";
pub const SEED_FAILED: &str = "Failed to seed database";
pub const SEED_IN_PROGRESS: &str = "Seeding database with 300 investors... This may take a minute.";

#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Seed status, then investor totals, then server analytics.
    async fn load_dashboard(&self) -> Result<Loaded<DashboardView>>;

    /// Seeds the backend and returns the number of investors created.
    async fn seed_database(&self) -> Result<Loaded<u64>>;
}

pub struct DashboardService {
    backend: Arc<dyn CrmBackendTrait>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn CrmBackendTrait>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn load_dashboard(&self) -> Result<Loaded<DashboardView>> {
        debug!("Loading dashboard...");

        let status = self.backend.seed_status().await.map_err(|e| {
            error!("Error checking seed status: {}", e);
            e
        })?;
        if !status.seeded {
            return Ok(Loaded::new(DashboardView::NeedsSeeding));
        }

        let investors = self.backend.list_investors(false).await.map_err(|e| {
            error!("Error loading investors for dashboard: {}", e);
            e
        })?;
        let stats = compute_dashboard_stats(&investors);

        // Analytics is optional: the cards stay usable without it.
        match self.backend.dashboard_analytics().await {
            Ok(analytics) if analytics.needs_seeding => {
                Ok(Loaded::new(DashboardView::NeedsSeeding))
            }
            Ok(analytics) => Ok(Loaded::new(DashboardView::Ready {
                stats,
                analytics: Some(analytics),
            })),
            Err(e) => {
                warn!("Dashboard analytics unavailable: {}", e);
                Ok(Loaded::new(DashboardView::Ready {
                    stats,
                    analytics: None,
                })
                .with_notice(Notice::error(DASHBOARD_LOAD_FAILED)))
            }
        }
    }

    async fn seed_database(&self) -> Result<Loaded<u64>> {
        let result = self.backend.run_seed().await.map_err(|e| {
            error!("Seeding failed: {}", e);
            e
        })?;
        if !result.success {
            return Err(Error::Backend(BackendError::Unsuccessful(
                result.message.clone(),
            )));
        }
        let count = result.count.unwrap_or_default();
        debug!("Seeded {} investors", count);
        Ok(Loaded::new(count)
            .with_notice(Notice::info(SEED_IN_PROGRESS))
            .with_notice(Notice::success(format!(
                "Successfully seeded {} investors!",
                count
            ))))
    }
}
