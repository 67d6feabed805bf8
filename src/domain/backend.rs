use super::models::{
    AdminStat, BalanceChange, ParkingSpot, Reservation, ReservationRequest, Role, Transaction, User,
};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction over the parking backend.
///
/// Implementations may talk HTTP, replay fixtures, or both.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    // ---
    /// Sign in with any identity; returns the profile for `role`.
    async fn login(&self, email: &str, role: Role) -> Result<User>;

    /// All known parking spots.
    async fn list_spots(&self) -> Result<Vec<ParkingSpot>>;

    /// Book a spot. Fails with `ClientError::SpotNotFound` for unknown ids.
    async fn create_reservation(&self, request: ReservationRequest) -> Result<Reservation>;

    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>>;

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    async fn get_admin_stats(&self) -> Result<Vec<AdminStat>>;

    /// Acknowledge a wallet change; returns the signed delta applied.
    async fn update_balance(&self, user_id: &str, amount: i64, kind: BalanceChange) -> Result<i64>;
}

/// Type alias for any backend that implements Backend.
pub type BackendPtr = Arc<dyn Backend>;
