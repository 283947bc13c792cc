//! # HTTP API
//!
//! JSON endpoints around the triage engine.
//!
//! ## Endpoints
//!
//! - `POST /v1/triage` - Triage one ticket `{ "ticket": "...", "ticket_id"?: "..." }`
//! - `POST /invoke` - Triage `{ "query": "..." }`, earlier response shape
//! - `GET /v1/taxonomy` - Members and defaults per category
//! - `GET /health` - Liveness, uptime, active classifier
//! - `GET /metrics` - Prometheus text exposition
//!
//! ## Example
//!
//! ```no_run
//! use triage::api::{create_router, AppState};
//! use triage::config::TriageConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(TriageConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors use one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Validation error: empty_ticket",
//!     "type": "invalid_request_error",
//!     "param": "ticket",
//!     "code": "empty_ticket"
//!   }
//! }
//! ```
//! Validation failures are 400, classifier failures 502 (504 on timeout)
//! unless the degraded policy is configured.

mod health;
mod taxonomy;
mod triage;
pub mod types;

pub use taxonomy::{CategoryInfo, TaxonomyResponse};
pub use types::*;

use crate::classifier::ClassifierError;
use crate::config::TriageConfig;
use crate::engine::TriageEngine;
use crate::metrics::MetricsCollector;
use crate::policy::BoundaryPolicy;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<TriageConfig>,
    pub engine: Arc<TriageEngine>,
    pub policy: BoundaryPolicy,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Build the engine (classifier included) from configuration.
    pub fn new(config: Arc<TriageConfig>) -> Result<Self, ClassifierError> {
        let engine = TriageEngine::from_config(&config)?;
        Ok(Self::from_engine(engine, config))
    }

    /// Wrap an already-built engine.
    pub fn from_engine(engine: TriageEngine, config: Arc<TriageConfig>) -> Self {
        let start_time = Instant::now();

        // A recorder may already be installed (tests, embedding); fall back to
        // a private one so /metrics still renders.
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .build_recorder()
                .handle()
        });

        Self {
            policy: BoundaryPolicy::from_config(&config.classifier),
            engine: Arc::new(engine),
            config,
            start_time,
            metrics_collector: Arc::new(MetricsCollector::new(start_time, prometheus_handle)),
        }
    }
}

/// Create the API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/v1/triage", post(triage::handle))
        .route("/invoke", post(triage::invoke))
        .route("/v1/taxonomy", get(taxonomy::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
