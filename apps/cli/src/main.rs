mod commands;
mod config;
mod main_lib;
mod render;

use commands::Command;
use config::Config;
use main_lib::{build_app, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let command = Command::parse(std::env::args().skip(1).collect())?;
    let app = build_app(&config)?;
    tracing::debug!("Using backend {}", app.api_base);

    commands::run(&app, &config, command).await
}
