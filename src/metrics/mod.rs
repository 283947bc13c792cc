//! # Metrics
//!
//! Prometheus metrics for the triage pipeline, exposed at `GET /metrics`.
//!
//! **Counters:**
//! - `triage_tickets_total{branch, reason}` - Routed tickets
//! - `triage_grounding_fallbacks_total{category, kind}` - Fields not matched exactly or by alias
//! - `triage_classifier_errors_total{error_type}` - Failed classification calls
//! - `triage_dispatch_total{target, status}` - Dispatch outcomes
//!
//! **Histograms:**
//! - `triage_classification_duration_seconds{provider}` - Classifier round trip
//!
//! Recording goes through the `metrics` facade, so every helper here is a
//! no-op until a recorder is installed (CLI one-shot runs never install one).

pub mod handler;

use crate::grounding::MatchKind;
use crate::taxonomy::Category;
use std::time::{Duration, Instant};

/// Owns the Prometheus handle and process start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(
        start_time: Instant,
        prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Seconds since the service started.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder.
///
/// Classifier latency buckets span fast local models through slow hosted
/// ones (seconds).
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let duration_buckets = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("triage_classification_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

pub fn record_ticket_routed(branch: &'static str, reason: &'static str) {
    metrics::counter!("triage_tickets_total", "branch" => branch, "reason" => reason).increment(1);
}

/// Count a field that needed correction or a fallback.
pub fn record_grounding_miss(category: Category, kind: MatchKind) {
    metrics::counter!(
        "triage_grounding_fallbacks_total",
        "category" => category.as_str(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

pub fn record_classifier_error(error_type: &'static str) {
    metrics::counter!("triage_classifier_errors_total", "error_type" => error_type).increment(1);
}

pub fn record_classification_duration(provider: &str, elapsed: Duration) {
    metrics::histogram!(
        "triage_classification_duration_seconds",
        "provider" => provider.to_string()
    )
    .record(elapsed.as_secs_f64());
}

pub fn record_dispatch(target: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };
    metrics::counter!("triage_dispatch_total", "target" => target, "status" => status)
        .increment(1);
}
