// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod admin;
mod auth;
mod health;
mod metrics;
mod reservations;
mod root;
mod shared_types;
mod spots;
mod transactions;

// Core handlers
pub use health::{health_check, HealthResponse};
pub use metrics::metrics_handler;
pub use root::root_handler;

// Backend API handlers
pub use admin::admin_stats;
pub use auth::login;
pub use reservations::{create_reservation, list_reservations};
pub use spots::list_spots;
pub use transactions::list_transactions;

pub use shared_types::ErrorResponse;
