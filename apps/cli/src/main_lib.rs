use std::sync::Arc;

use mf360_client::Mf360Client;
use mf360_core::backend::CrmBackendTrait;
use mf360_core::dashboard::DashboardService;
use mf360_core::insights::InsightsService;
use mf360_core::investors::InvestorsService;
use mf360_core::session::{AuthService, FileSessionStore, SessionContext};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Services shared by every command.
pub struct AppContext {
    pub api_base: String,
    pub session: Arc<SessionContext>,
    pub auth: AuthService,
    pub dashboard: DashboardService,
    pub investors: InvestorsService,
    pub insights: InsightsService,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_app(config: &Config) -> anyhow::Result<AppContext> {
    let store = Arc::new(FileSessionStore::new(&config.data_dir));
    let session = Arc::new(SessionContext::new(store));
    let user = session.load()?;
    tracing::debug!("Session data dir: {}", config.data_dir.display());

    let client = Mf360Client::new(&config.backend_url, config.request_timeout)?
        .with_token(user.and_then(|u| u.token));
    let api_base = client.base_url().to_string();
    let backend: Arc<dyn CrmBackendTrait> = Arc::new(client);

    Ok(AppContext {
        api_base,
        auth: AuthService::new(backend.clone(), session.clone()),
        dashboard: DashboardService::new(backend.clone()),
        investors: InvestorsService::new(backend.clone()),
        insights: InsightsService::new(backend),
        session,
    })
}
