use crate::app_state::AppState;
use crate::domain::AdminStat;
use crate::infrastructure::fixtures;
use axum::{extract::State, Json};
use std::time::Instant;

/// `GET /api/admin/stats`
pub async fn admin_stats(State(state): State<AppState>) -> Json<Vec<AdminStat>> {
    // ---
    let start = Instant::now();
    state.track(start, "/api/admin/stats", "GET", 200);
    Json(fixtures::admin_stats())
}
