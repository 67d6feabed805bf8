use crate::app_state::AppState;
use crate::domain::ParkingSpot;
use crate::infrastructure::fixtures;
use axum::{extract::State, Json};
use std::time::Instant;

/// `GET /api/spots`
pub async fn list_spots(State(state): State<AppState>) -> Json<Vec<ParkingSpot>> {
    // ---
    let start = Instant::now();
    let spots = fixtures::parking_spots();
    state.track(start, "/api/spots", "GET", 200);
    Json(spots)
}
