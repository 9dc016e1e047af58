use async_trait::async_trait;

use super::{LoginRequest, SeedRunResult, SeedStatus, SignupRequest};
use crate::analysis::{AiRunResult, CachedAnalysis};
use crate::dashboard::DashboardAnalytics;
use crate::errors::Result;
use crate::investors::{Investor, InvestorForm};
use crate::session::UserSession;

/// REST operations the CRM consumes.
///
/// Implemented over HTTP by the `mf360-client` crate. Each call is a single
/// request with no retry; failures come back as
/// [`crate::errors::BackendError`].
#[async_trait]
pub trait CrmBackendTrait: Send + Sync {
    /// POST /auth/login
    async fn login(&self, credentials: &LoginRequest) -> Result<UserSession>;

    /// POST /auth/signup
    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    /// GET /investors, optionally with `include_portfolios=true`
    async fn list_investors(&self, include_portfolios: bool) -> Result<Vec<Investor>>;

    /// GET /investors/:id, with nested portfolios and transactions
    async fn get_investor(&self, investor_id: &str) -> Result<Investor>;

    /// POST /investors
    async fn create_investor(&self, form: &InvestorForm) -> Result<()>;

    /// PUT /investors/:id
    async fn update_investor(&self, investor_id: &str, form: &InvestorForm) -> Result<()>;

    /// DELETE /investors/:id
    async fn delete_investor(&self, investor_id: &str) -> Result<()>;

    /// GET /seed/status
    async fn seed_status(&self) -> Result<SeedStatus>;

    /// POST /seed/run
    async fn run_seed(&self) -> Result<SeedRunResult>;

    /// POST /ai/run/:id
    async fn run_analysis(&self, investor_id: &str) -> Result<AiRunResult>;

    /// GET /ai/summary/:id; `None` when nothing has been cached yet
    async fn cached_analysis(&self, investor_id: &str) -> Result<Option<CachedAnalysis>>;

    /// GET /dashboard/analytics
    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics>;
}
