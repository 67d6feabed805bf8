//! Prometheus metrics implementation.
//!
//! Delegates to the sibling `counters.rs` and `recorder.rs` helpers, which
//! write into the global `metrics` registry. Metrics are registered on first
//! use; the handle kept in `recorder.rs` renders them in Prometheus text
//! format.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because the `metrics` crate keeps a global registry; see
/// `recorder.rs` for the handle.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_reservation_created(&self) {
        tracing::debug!("Recording reservation created event");
        super::increment_reservation_created();
    }

    fn record_backend_fallback(&self, operation: &str) {
        tracing::debug!("Recording backend fallback for {}", operation);
        super::increment_backend_fallback(operation);
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
