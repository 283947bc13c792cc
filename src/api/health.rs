//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub classifier: ClassifierInfo,
    pub escalation_target: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ClassifierInfo {
    pub provider: String,
    pub model: String,
}

/// GET /health - Liveness plus the active classifier.
///
/// Does not call the classifier; a reachable service is not a liveness
/// requirement.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let classifier = state.engine.classifier();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        classifier: ClassifierInfo {
            provider: classifier.provider().to_string(),
            model: classifier.model().to_string(),
        },
        escalation_target: state.engine.escalation_target(),
    })
}
