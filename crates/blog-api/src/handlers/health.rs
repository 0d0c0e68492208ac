//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

impl HealthResponse {
    fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            storage: None,
        }
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        storage: Some(format!("{:?}", state.config().storage.backend).to_lowercase()),
        ..HealthResponse::healthy()
    })
}

/// Liveness probe
///
/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
