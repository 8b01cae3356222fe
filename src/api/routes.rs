//! API route configuration

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{CorsConfig, ServerConfig};

use super::handlers::{self, AppState};

/// Build the complete API router with middleware
pub fn build_router(app_state: AppState, server: &ServerConfig, cors: &CorsConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::identity).post(handlers::chat));

    if server.max_body_size_mb > 0 {
        let limit = server.max_body_size_mb * 1024 * 1024;
        info!("Request body limit set to {} MB", server.max_body_size_mb);
        router = router.layer(RequestBodyLimitLayer::new(limit));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
        .with_state(app_state)
}

/// Cross-origin layer. With the default config this allows any origin, any
/// method and any header, without credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allow_any_origin {
        layer = layer.allow_origin(Any);
    }
    if config.allow_any_method {
        layer = layer.allow_methods(Any);
    }
    if config.allow_any_header {
        layer = layer.allow_headers(Any);
    }

    info!(
        "CORS policy: any_origin={} any_method={} any_header={}",
        config.allow_any_origin, config.allow_any_method, config.allow_any_header
    );
    layer
}
