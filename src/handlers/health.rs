use crate::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    // ---
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<usize>,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default, only confirms the web server is running.
/// - With `mode=full`, also reports the size of the reservation ledger.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }`, plus `"reservations"` in full mode
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    // ---
    let reservations = match params.mode.as_deref() {
        Some("full") => Some(state.ledger_len().await),
        _ => None,
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            reservations,
        }),
    )
}
