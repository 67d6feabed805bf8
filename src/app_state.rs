//! Shared state of the fixture backend server.
//!
//! Cloned into every handler via Axum's `State` extractor. The only mutable
//! piece is the reservation ledger, behind an async lock.

use crate::domain::{ClockPtr, MetricsPtr, Reservation};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Dependencies of the fixture server handlers.
///
/// - `metrics`: Prometheus-backed or no-op, chosen at startup
/// - `clock`: source of booking times and the local hour used for pricing
/// - `ledger`: reservations created since the server started
#[derive(Clone)]
pub(crate) struct AppState {
    // ---
    metrics: MetricsPtr,
    clock: ClockPtr,
    ledger: Arc<RwLock<Vec<Reservation>>>,
}

impl AppState {
    // ---
    pub fn new(metrics: MetricsPtr, clock: ClockPtr) -> Self {
        // ---
        AppState {
            metrics,
            clock,
            ledger: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub(crate) fn metrics(&self) -> &MetricsPtr {
        &self.metrics
    }

    pub(crate) fn clock(&self) -> &ClockPtr {
        &self.clock
    }

    /// Appends a reservation to the ledger.
    pub(crate) async fn record_reservation(&self, reservation: Reservation) {
        // ---
        self.ledger.write().await.push(reservation);
    }

    /// Ledger entries belonging to `user_id`, newest first.
    pub(crate) async fn reservations_for(&self, user_id: &str) -> Vec<Reservation> {
        // ---
        self.ledger
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub(crate) async fn ledger_len(&self) -> usize {
        self.ledger.read().await.len()
    }

    /// Records one served request.
    pub(crate) fn track(&self, start: Instant, path: &str, method: &str, status: u16) {
        // ---
        self.metrics.record_http_request(start, path, method, status);
    }
}
