//! Application assembly and HTTP server startup

use crate::{
    api::{build_router, AppState},
    chat::ChatService,
    config::Config,
    error::{RelayError, Result},
    provider::AzureOpenAIClient,
    shutdown::shutdown_signal,
};
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// Construct the model client once and wire it into the router
pub fn build_app(config: &Config) -> Result<Router> {
    let client = Arc::new(AzureOpenAIClient::from_settings(&config.azure_openai)?);
    info!("Model client initialized for {}", config.azure_openai.endpoint);

    let state = AppState {
        chat: Arc::new(ChatService::new(client)),
    };

    Ok(build_router(state, &config.server, &config.cors))
}

/// Bind `addr` and serve until a shutdown signal arrives
pub async fn start_server(addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RelayError::Internal(format!("failed to bind {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RelayError::Internal(format!("server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_app_with_valid_config() {
        let config = Config::with_endpoint("https://example.openai.azure.com", "key");
        assert!(build_app(&config).is_ok());
    }

    #[tokio::test]
    async fn test_build_app_rejects_unparseable_endpoint() {
        let config = Config::with_endpoint("http://bad host", "key");
        assert!(build_app(&config).is_err());
    }
}
