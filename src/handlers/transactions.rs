use crate::app_state::AppState;
use crate::domain::Transaction;
use crate::infrastructure::fixtures;
use axum::{
    extract::{Path, State},
    Json,
};
use std::time::Instant;

/// `GET /api/transactions/{user_id}`: every user sees the seeded history.
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Transaction>> {
    // ---
    let start = Instant::now();
    tracing::debug!("Transactions for {}", user_id);
    state.track(start, "/api/transactions/{user_id}", "GET", 200);
    Json(fixtures::transactions())
}
