//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All origins, methods, and headers are permitted; the endpoint is meant
//! to be called straight from browser frontends.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::core_state::CoreState;

/// Build the service router.
pub fn upscale_router(core: Arc<CoreState>) -> Router {
    Router::new()
        .route("/upscale", post(endpoints::upscale::handle))
        .route("/health", get(endpoints::health::check))
        .with_state(core)
        .layer(CorsLayer::permissive())
}
