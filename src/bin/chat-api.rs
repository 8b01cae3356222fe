//! eShop Chat API server binary
//!
//! Loads layered configuration, then serves `GET /` and `POST /` until
//! Ctrl+C or SIGTERM.

use anyhow::Context;
use eshop_chat_api::{config::Config, observability, server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("CHAT_API_CONFIG").unwrap_or_else(|_| "appsettings.json".to_string());

    // Configuration must be complete before anything binds
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    observability::init_from_config(&config.logging);

    info!("Starting eShop Chat API");
    info!("Configuration loaded and validated from {}", config_path);

    let app = server::build_app(&config).context("failed to build application")?;

    server::start_server(&config.bind_address(), app).await?;

    Ok(())
}
