// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use handlers::{
    admin_stats, create_reservation, health_check, list_reservations, list_spots,
    list_transactions, login, metrics_handler, root_handler,
};

// Public exports (visible outside this module)
pub mod controller;
pub mod domain;
pub mod event_loop;
pub mod state;
pub mod toast;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;

pub use config::*;
pub use controller::{AppController, BookingDraft, IssueKind};
pub use event_loop::{LoopTimings, UiEvent};
pub use handlers::{ErrorResponse, HealthResponse};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_backend, // ---
    create_file_repository,
    create_memory_repository,
    create_noop_metrics,
    create_prom_metrics,
};
pub use infrastructure::fixtures;
pub use infrastructure::simulator::AvailabilitySimulator;
pub use infrastructure::weather::WeatherClient;

use domain::random::StdRandom;
use domain::{ClockPtr, MetricsPtr, SystemClock};
use state::ClientStore;

/// Picks the metrics implementation named by `metrics_type` (`prom` or anything else for no-op).
pub fn create_metrics(metrics_type: &str) -> Result<MetricsPtr> {
    // ---
    if metrics_type == "prom" {
        create_prom_metrics()
    } else {
        create_noop_metrics()
    }
}

/// Build the fixture backend router from environment configuration.
///
/// Reads only the server settings; client storage is not required.
pub fn create_router() -> Result<Router> {
    // ---
    let config = ServerConfig::from_env()?;

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    create_server_router(&config)
}

/// Build the fixture backend router for already-loaded server settings.
pub fn create_server_router(config: &ServerConfig) -> Result<Router> {
    // ---
    let metrics = create_metrics(&config.metrics_type)?;
    Ok(create_router_with(metrics, Arc::new(SystemClock)))
}

/// Build the fixture backend router with explicit dependencies.
pub fn create_router_with(metrics: MetricsPtr, clock: ClockPtr) -> Router {
    // ---
    let app_state = AppState::new(metrics, clock);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest(
            "/api",
            Router::new()
                .route("/auth/login", post(login))
                .route("/spots", get(list_spots))
                .route("/reservations", post(create_reservation))
                .route("/reservations/{user_id}", get(list_reservations))
                .route("/transactions/{user_id}", get(list_transactions))
                .route("/admin/stats", get(admin_stats)),
        )
        .with_state(app_state)
}

/// Wires a controller from configuration: file-backed state, HTTP-first
/// backend, entropy-seeded simulator and the system clock.
pub async fn create_controller(config: &AppConfig, metrics: MetricsPtr) -> Result<AppController> {
    // ---
    let clock: ClockPtr = Arc::new(SystemClock);
    let repository = create_file_repository(&config.storage.dir).await?;
    let backend = create_backend(config.api.clone(), repository.clone(), metrics, clock.clone())?;
    let store = ClientStore::load(repository).await;
    let simulator = AvailabilitySimulator::new(&config.simulator, Box::new(StdRandom::from_entropy()));

    Ok(AppController::new(
        backend,
        store,
        simulator,
        clock,
        config.booking.clone(),
    ))
}
