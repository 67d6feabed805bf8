use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the counter of created reservations.
pub fn increment_reservation_created() {
    counter!("reservations_created_total").increment(1);
}

/// Increment the counter of backend calls served from fixtures.
pub fn increment_backend_fallback(operation: &str) {
    counter!("backend_fallback_total", "operation" => operation.to_string()).increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
