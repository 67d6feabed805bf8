use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::time::Instant;

/// `GET /metrics`: Prometheus text exposition, empty with no-op metrics.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    let start = Instant::now();
    let body = state.metrics().render();
    state.track(start, "/metrics", "GET", 200);

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
