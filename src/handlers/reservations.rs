//! Booking endpoints.
//!
//! The server keeps no availability state: a booking of a known spot always
//! succeeds, even when its fixture shows no free bays.

use super::shared_types::ApiError;
use crate::app_state::AppState;
use crate::domain::{ClientError, Reservation, ReservationRequest};
use crate::infrastructure::fixtures;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::time::Instant;

/// `POST /api/reservations`
#[tracing::instrument(skip(state, request), fields(spot_id = %request.spot_id))]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    // ---
    let start = Instant::now();

    let Some(spot) = fixtures::find_spot(&request.spot_id) else {
        tracing::warn!("Booking for unknown spot {}", request.spot_id);
        state.track(start, "/api/reservations", "POST", 404);
        return Err(ClientError::SpotNotFound(request.spot_id).into());
    };

    let clock = state.clock();
    let reservation = fixtures::new_reservation(&spot, &request, clock.now(), clock.local_hour());
    tracing::info!(
        "Reservation {} for {} ({} UZS)",
        reservation.id,
        spot.id,
        reservation.total_price
    );

    state.record_reservation(reservation.clone()).await;
    state.metrics().record_reservation_created();
    state.track(start, "/api/reservations", "POST", 201);

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// `GET /api/reservations/{user_id}`, newest first.
pub async fn list_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Reservation>> {
    // ---
    let start = Instant::now();
    let reservations = state.reservations_for(&user_id).await;
    state.track(start, "/api/reservations/{user_id}", "GET", 200);
    Json(reservations)
}
