use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Smart Parking fixture backend
Version: {version}

Available endpoints:
  - POST   /api/auth/login                - Sign in, returns the canned profile
  - GET    /api/spots                     - List parking spots
  - POST   /api/reservations              - Book a spot
  - GET    /api/reservations/{{user_id}}    - Reservations of a user
  - GET    /api/transactions/{{user_id}}    - Wallet history of a user
  - GET    /api/admin/stats               - Weekly revenue and bookings
  - GET    /health                        - Light health check
  - GET    /health?mode=full              - Full health check (includes ledger size)
  - GET    /metrics                       - Prometheus metrics
"#
    )
}
