use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};

use super::{build_investor_detail, Investor, InvestorDetail, InvestorFilter, InvestorForm};
use crate::backend::CrmBackendTrait;
use crate::errors::Result;
use crate::notifications::Notice;

pub const INVESTORS_LOAD_FAILED: &str = "Failed to load investors";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load investor details";
pub const CREATE_FAILED: &str = "Failed to create investor";
pub const UPDATE_FAILED: &str = "Failed to update investor";
pub const DELETE_FAILED: &str = "Failed to delete investor";
pub const CREATED: &str = "Investor created successfully";
pub const UPDATED: &str = "Investor updated successfully";
pub const DELETED: &str = "Investor deleted successfully";

/// Result of opening an investor's detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Loaded(Box<InvestorDetail>),
    /// The investor could not be loaded; go back to the list.
    RedirectToList(Notice),
}

#[async_trait]
pub trait InvestorsServiceTrait: Send + Sync {
    async fn list_investors(&self, filter: &InvestorFilter) -> Result<Vec<Investor>>;
    async fn load_detail(&self, investor_id: &str) -> DetailOutcome;
    async fn create_investor(&self, form: &InvestorForm) -> Result<Notice>;
    async fn update_investor(&self, investor_id: &str, form: &InvestorForm) -> Result<Notice>;
    async fn delete_investor(&self, investor_id: &str) -> Result<Notice>;
}

pub struct InvestorsService {
    backend: Arc<dyn CrmBackendTrait>,
}

impl InvestorsService {
    pub fn new(backend: Arc<dyn CrmBackendTrait>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl InvestorsServiceTrait for InvestorsService {
    async fn list_investors(&self, filter: &InvestorFilter) -> Result<Vec<Investor>> {
        let investors = self.backend.list_investors(false).await.map_err(|e| {
            error!("Error listing investors: {}", e);
            e
        })?;
        let matched: Vec<Investor> = filter.apply(&investors).into_iter().cloned().collect();
        debug!("{} of {} investors match", matched.len(), investors.len());
        Ok(matched)
    }

    async fn load_detail(&self, investor_id: &str) -> DetailOutcome {
        match self.backend.get_investor(investor_id).await {
            Ok(investor) => DetailOutcome::Loaded(Box::new(build_investor_detail(investor))),
            Err(e) => {
                warn!("Could not load investor {}: {}", investor_id, e);
                DetailOutcome::RedirectToList(Notice::error(DETAIL_LOAD_FAILED))
            }
        }
    }

    async fn create_investor(&self, form: &InvestorForm) -> Result<Notice> {
        form.validate()?;
        self.backend.create_investor(form).await?;
        Ok(Notice::success(CREATED))
    }

    async fn update_investor(&self, investor_id: &str, form: &InvestorForm) -> Result<Notice> {
        form.validate()?;
        self.backend.update_investor(investor_id, form).await?;
        Ok(Notice::success(UPDATED))
    }

    async fn delete_investor(&self, investor_id: &str) -> Result<Notice> {
        self.backend.delete_investor(investor_id).await?;
        Ok(Notice::success(DELETED))
    }
}
