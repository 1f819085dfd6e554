use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::config::config;
use crate::handlers::{crud, health};
use crate::services::ScaffoldService;

/// HTTP router with the scaffold service injected as an extension.
pub fn app(service: Arc<ScaffoldService>) -> Router {
    let settings = config();

    let mut router = Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        // Generator
        .route("/api/crud", post(crud::create))
        .layer(Extension(service))
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes));

    if settings.security.enable_cors {
        router = router.layer(cors_layer(&settings.security.cors_origins));
    }
    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(allowed)
}
