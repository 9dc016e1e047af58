//! HTTP client for the MF360 CRM backend.
//!
//! All routes live under `<backend>/api` and answer with a
//! `{success, data}` envelope, or `{detail}` on failure.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use mf360_core::analysis::{AiRunResult, CachedAnalysis};
use mf360_core::backend::{
    CrmBackendTrait, LoginRequest, SeedRunResult, SeedStatus, SignupRequest,
};
use mf360_core::dashboard::DashboardAnalytics;
use mf360_core::investors::{Investor, InvestorForm};
use mf360_core::session::UserSession;

use crate::error::{ClientError, Result};
use crate::types::{ApiEnvelope, ErrorResponse};

/// `<backend>/api`, without a trailing slash.
pub fn api_base_url(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim_end_matches('/'))
}

/// Client for the MF360 REST API.
#[derive(Debug, Clone)]
pub struct Mf360Client {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Mf360Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `backend_url` - The backend origin (e.g., "http://localhost:8001")
    /// * `timeout` - Per-request timeout
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            client,
            base_url: api_base_url(backend_url),
            token: None,
        })
    }

    /// Attach the session token, sent as a bearer credential.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::invalid_request("Invalid access token format"))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Turns a status and raw body into a typed payload or an error.
    pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
        if !(200..300).contains(&status) {
            let detail = serde_json::from_str::<ErrorResponse>(body)
                .ok()
                .and_then(|e| e.message());
            return Err(ClientError::api(status, detail));
        }

        serde_json::from_str(body).map_err(|e| {
            error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body, e
            );
            ClientError::Json(e)
        })
    }

    /// Unwraps `{success, data}`; a missing payload or `success: false` is
    /// an error.
    pub(crate) fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T> {
        if !envelope.success {
            return Err(ClientError::Unsuccessful(
                envelope
                    .message
                    .unwrap_or_else(|| "success flag not set".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Unsuccessful("response carried no data".to_string()))
    }

    /// Checks `{success}` for calls whose payload is not used.
    pub(crate) fn check_envelope(envelope: ApiEnvelope<serde_json::Value>) -> Result<()> {
        if envelope.success {
            Ok(())
        } else {
            Err(ClientError::Unsuccessful(
                envelope
                    .message
                    .unwrap_or_else(|| "success flag not set".to_string()),
            ))
        }
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("API response ({}): {} bytes", status, text.len());
        Self::decode_body(status.as_u16(), &text)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.send::<(), _>(Method::GET, path, None).await?;
        Self::unwrap_envelope(envelope)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    /// POST /auth/login
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserSession> {
        let envelope = self
            .send(Method::POST, "/auth/login", Some(credentials))
            .await?;
        Self::unwrap_envelope(envelope)
    }

    /// POST /auth/signup
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let envelope = self.send(Method::POST, "/auth/signup", Some(request)).await?;
        Self::check_envelope(envelope)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Investors
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /investors[?include_portfolios=true]
    pub async fn list_investors(&self, include_portfolios: bool) -> Result<Vec<Investor>> {
        let path = if include_portfolios {
            "/investors?include_portfolios=true"
        } else {
            "/investors"
        };
        self.get_data(path).await
    }

    /// GET /investors/{investorId}
    pub async fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.get_data(&format!("/investors/{}", urlencoding::encode(investor_id)))
            .await
    }

    /// POST /investors
    pub async fn create_investor(&self, form: &InvestorForm) -> Result<()> {
        let envelope = self.send(Method::POST, "/investors", Some(form)).await?;
        Self::check_envelope(envelope)
    }

    /// PUT /investors/{investorId}
    pub async fn update_investor(&self, investor_id: &str, form: &InvestorForm) -> Result<()> {
        let path = format!("/investors/{}", urlencoding::encode(investor_id));
        let envelope = self.send(Method::PUT, &path, Some(form)).await?;
        Self::check_envelope(envelope)
    }

    /// DELETE /investors/{investorId}
    pub async fn delete_investor(&self, investor_id: &str) -> Result<()> {
        let path = format!("/investors/{}", urlencoding::encode(investor_id));
        let envelope = self.send::<(), _>(Method::DELETE, &path, None).await?;
        Self::check_envelope(envelope)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding and analytics
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /seed/status
    pub async fn seed_status(&self) -> Result<SeedStatus> {
        self.get_data("/seed/status").await
    }

    /// POST /seed/run
    ///
    /// Answers `{success, message, count}` directly, without a data envelope.
    pub async fn run_seed(&self) -> Result<SeedRunResult> {
        self.send::<(), _>(Method::POST, "/seed/run", None).await
    }

    /// GET /dashboard/analytics
    pub async fn dashboard_analytics(&self) -> Result<DashboardAnalytics> {
        self.get_data("/dashboard/analytics").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI analysis
    // ─────────────────────────────────────────────────────────────────────────

    /// POST /ai/run/{investorId}
    pub async fn run_analysis(&self, investor_id: &str) -> Result<AiRunResult> {
        let path = format!("/ai/run/{}", urlencoding::encode(investor_id));
        let envelope = self.send::<(), _>(Method::POST, &path, None).await?;
        Self::unwrap_envelope(envelope)
    }

    /// GET /ai/summary/{investorId}; a 404 means nothing is stored yet.
    pub async fn cached_analysis(&self, investor_id: &str) -> Result<Option<CachedAnalysis>> {
        let path = format!("/ai/summary/{}", urlencoding::encode(investor_id));
        match self.get_data(&path).await {
            Ok(cached) => Ok(Some(cached)),
            Err(e) if e.is_not_found() => {
                debug!("No stored analysis for {}", investor_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CrmBackendTrait for Mf360Client {
    async fn login(&self, credentials: &LoginRequest) -> mf360_core::Result<UserSession> {
        Ok(Mf360Client::login(self, credentials).await?)
    }

    async fn signup(&self, request: &SignupRequest) -> mf360_core::Result<()> {
        Ok(Mf360Client::signup(self, request).await?)
    }

    async fn list_investors(&self, include_portfolios: bool) -> mf360_core::Result<Vec<Investor>> {
        Ok(Mf360Client::list_investors(self, include_portfolios).await?)
    }

    async fn get_investor(&self, investor_id: &str) -> mf360_core::Result<Investor> {
        Ok(Mf360Client::get_investor(self, investor_id).await?)
    }

    async fn create_investor(&self, form: &InvestorForm) -> mf360_core::Result<()> {
        Ok(Mf360Client::create_investor(self, form).await?)
    }

    async fn update_investor(
        &self,
        investor_id: &str,
        form: &InvestorForm,
    ) -> mf360_core::Result<()> {
        Ok(Mf360Client::update_investor(self, investor_id, form).await?)
    }

    async fn delete_investor(&self, investor_id: &str) -> mf360_core::Result<()> {
        Ok(Mf360Client::delete_investor(self, investor_id).await?)
    }

    async fn seed_status(&self) -> mf360_core::Result<SeedStatus> {
        Ok(Mf360Client::seed_status(self).await?)
    }

    async fn run_seed(&self) -> mf360_core::Result<SeedRunResult> {
        Ok(Mf360Client::run_seed(self).await?)
    }

    async fn run_analysis(&self, investor_id: &str) -> mf360_core::Result<AiRunResult> {
        Ok(Mf360Client::run_analysis(self, investor_id).await?)
    }

    async fn cached_analysis(
        &self,
        investor_id: &str,
    ) -> mf360_core::Result<Option<CachedAnalysis>> {
        Ok(Mf360Client::cached_analysis(self, investor_id).await?)
    }

    async fn dashboard_analytics(&self) -> mf360_core::Result<DashboardAnalytics> {
        Ok(Mf360Client::dashboard_analytics(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url() {
        assert_eq!(api_base_url("http://localhost:8001"), "http://localhost:8001/api");
        assert_eq!(api_base_url("https://crm.example.com/"), "https://crm.example.com/api");
    }

    #[test]
    fn test_client_builds_urls_under_api() {
        let client = Mf360Client::new("http://localhost:8001/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001/api");
        assert_eq!(client.url("/seed/status"), "http://localhost:8001/api/seed/status");
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let client = Mf360Client::new("http://localhost:8001", Duration::from_secs(5))
            .unwrap()
            .with_token(Some("token_abc".to_string()));
        let headers = client.headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token_abc");

        let anonymous = Mf360Client::new("http://localhost:8001", Duration::from_secs(5)).unwrap();
        assert!(anonymous.headers().unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_rejects_token_with_control_characters() {
        let client = Mf360Client::new("http://localhost:8001", Duration::from_secs(5))
            .unwrap()
            .with_token(Some("bad\ntoken".to_string()));
        assert!(matches!(
            client.headers(),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_decode_investor_list_envelope() {
        let body = r#"{"success": true, "count": 2, "data": [
            {"investor_id": "INV0001", "name": "Rajesh Sharma", "total_aum": 1250000.5, "gain_loss_pct": 8.2},
            {"investor_id": "INV0002", "name": "Priya Patel", "total_aum": "98000", "gain_loss_pct": null}
        ]}"#;
        let envelope: ApiEnvelope<Vec<Investor>> = Mf360Client::decode_body(200, body).unwrap();
        assert_eq!(envelope.count, Some(2));
        let investors = Mf360Client::unwrap_envelope(envelope).unwrap();
        assert_eq!(investors.len(), 2);
        assert_eq!(investors[1].total_aum.to_string(), "98000");
        assert!(investors[1].gain_loss_pct.is_zero());
    }

    #[test]
    fn test_error_body_detail() {
        let err = Mf360Client::decode_body::<ApiEnvelope<UserSession>>(
            401,
            r#"{"detail": "Invalid credentials"}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 401);
                assert_eq!(detail.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_list_detail() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}]}"#;
        let err = Mf360Client::decode_body::<ApiEnvelope<()>>(422, body).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 422, detail: Some(ref d) } if d == "field required"
        ));
    }

    #[test]
    fn test_non_json_error_body() {
        let err = Mf360Client::decode_body::<ApiEnvelope<()>>(502, "<html>Bad Gateway</html>")
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 502, detail: None }));
    }

    #[test]
    fn test_malformed_success_body() {
        let err = Mf360Client::decode_body::<ApiEnvelope<SeedStatus>>(200, "not json").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let envelope: ApiEnvelope<SeedStatus> =
            Mf360Client::decode_body(200, r#"{"success": false, "message": "busy"}"#).unwrap();
        assert!(matches!(
            Mf360Client::unwrap_envelope(envelope),
            Err(ClientError::Unsuccessful(ref m)) if m == "busy"
        ));

        let envelope: ApiEnvelope<serde_json::Value> =
            Mf360Client::decode_body(200, r#"{"success": true}"#).unwrap();
        assert!(Mf360Client::check_envelope(envelope).is_ok());
    }

    #[test]
    fn test_seed_run_is_not_enveloped() {
        let result: SeedRunResult = Mf360Client::decode_body(
            200,
            r#"{"success": true, "message": "Seeding completed successfully", "count": 300}"#,
        )
        .unwrap();
        assert_eq!(result.count, Some(300));
    }

    #[test]
    fn test_cached_analysis_payload() {
        let body = r#"{"success": true, "data": {
            "investor_id": "INV0005",
            "analysis_result": {"churn_risk": {"churnRisk": "High", "score": 0.7}},
            "ai_summary": {"summary": "Client at risk of leaving."},
            "created_at": "2024-05-02T08:30:00+00:00"
        }}"#;
        let envelope: ApiEnvelope<CachedAnalysis> = Mf360Client::decode_body(200, body).unwrap();
        let cached = Mf360Client::unwrap_envelope(envelope).unwrap();
        assert!(cached.analysis.churn_risk().is_high());
        assert_eq!(cached.ai_summary.text(), "Client at risk of leaving.");
    }
}
