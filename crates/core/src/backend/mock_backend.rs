//! In-memory backend used by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CrmBackendTrait, LoginRequest, SeedRunResult, SeedStatus, SignupRequest};
use crate::analysis::{AiRunResult, CachedAnalysis};
use crate::dashboard::DashboardAnalytics;
use crate::errors::{BackendError, Error, Result};
use crate::investors::{Investor, InvestorForm};
use crate::session::UserSession;

/// Canned responses plus a log of the operations that were called.
///
/// Any operation can be made to fail with [`MockBackend::fail`]; status `0`
/// simulates a network error, anything else an API error.
#[derive(Default)]
pub(crate) struct MockBackend {
    pub investors: Mutex<Vec<Investor>>,
    pub seed_status: SeedStatus,
    pub seed_result: SeedRunResult,
    pub analytics: DashboardAnalytics,
    pub run_result: AiRunResult,
    pub cached: Option<CachedAnalysis>,
    pub user: UserSession,
    failures: Mutex<HashMap<&'static str, (u16, Option<String>)>>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn with_investors(investors: Vec<Investor>) -> Self {
        Self {
            investors: Mutex::new(investors),
            seed_status: SeedStatus {
                seeded: true,
                investor_count: 0,
            },
            ..Self::default()
        }
    }

    pub fn fail(&self, operation: &'static str, status: u16, detail: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, (status, detail.map(str::to_string)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.failures.lock().unwrap().get(operation) {
            Some((0, _)) => Err(BackendError::Network("connection refused".to_string()).into()),
            Some((status, detail)) => Err(BackendError::Api {
                status: *status,
                detail: detail.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CrmBackendTrait for MockBackend {
    async fn login(&self, _credentials: &LoginRequest) -> Result<UserSession> {
        self.enter("login")?;
        Ok(self.user.clone())
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<()> {
        self.enter("signup")
    }

    async fn list_investors(&self, include_portfolios: bool) -> Result<Vec<Investor>> {
        self.enter("list_investors")?;
        let investors = self.investors.lock().unwrap().clone();
        if include_portfolios {
            return Ok(investors);
        }
        Ok(investors
            .into_iter()
            .map(|inv| Investor {
                portfolios: Vec::new(),
                ..inv
            })
            .collect())
    }

    async fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.enter("get_investor")?;
        self.investors
            .lock()
            .unwrap()
            .iter()
            .find(|inv| inv.investor_id == investor_id)
            .cloned()
            .ok_or_else(|| {
                Error::Backend(BackendError::Api {
                    status: 404,
                    detail: Some("Investor not found".to_string()),
                })
            })
    }

    async fn create_investor(&self, form: &InvestorForm) -> Result<()> {
        self.enter("create_investor")?;
        let mut investors = self.investors.lock().unwrap();
        let investor_id = format!("INV{:04}", investors.len() + 1);
        investors.push(Investor {
            investor_id,
            name: form.name.clone(),
            email: form.email.clone(),
            mobile: form.mobile.clone(),
            pan: form.pan.clone(),
            risk_profile: form.risk_profile.clone(),
            investor_type: form.investor_type.clone(),
            ..Investor::default()
        });
        Ok(())
    }

    async fn update_investor(&self, investor_id: &str, form: &InvestorForm) -> Result<()> {
        self.enter("update_investor")?;
        let mut investors = self.investors.lock().unwrap();
        if let Some(inv) = investors.iter_mut().find(|inv| inv.investor_id == investor_id) {
            inv.name = form.name.clone();
            inv.email = form.email.clone();
            inv.mobile = form.mobile.clone();
            inv.pan = form.pan.clone();
            inv.risk_profile = form.risk_profile.clone();
            inv.investor_type = form.investor_type.clone();
        }
        Ok(())
    }

    async fn delete_investor(&self, investor_id: &str) -> Result<()> {
        self.enter("delete_investor")?;
        self.investors
            .lock()
            .unwrap()
            .retain(|inv| inv.investor_id != investor_id);
        Ok(())
    }

    async fn seed_status(&self) -> Result<SeedStatus> {
        self.enter("seed_status")?;
        Ok(self.seed_status.clone())
    }

    async fn run_seed(&self) -> Result<SeedRunResult> {
        self.enter("run_seed")?;
        Ok(self.seed_result.clone())
    }

    async fn run_analysis(&self, _investor_id: &str) -> Result<AiRunResult> {
        self.enter("run_analysis")?;
        Ok(self.run_result.clone())
    }

    async fn cached_analysis(&self, _investor_id: &str) -> Result<Option<CachedAnalysis>> {
        self.enter("cached_analysis")?;
        Ok(self.cached.clone())
    }

    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics> {
        self.enter("dashboard_analytics")?;
        Ok(self.analytics.clone())
    }
}
