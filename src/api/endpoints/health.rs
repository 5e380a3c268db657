//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::APP_VERSION;
use crate::core_state::CoreState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_scale: u32,
    pub version: &'static str,
}

/// `GET /health`: liveness check; reports the loaded model's scale.
pub async fn check(State(core): State<Arc<CoreState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_scale: core.model.scale_factor(),
        version: APP_VERSION,
    })
}
