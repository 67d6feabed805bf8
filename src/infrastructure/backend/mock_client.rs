//! Backend client that tries HTTP and falls back to fixtures.
//!
//! Every operation first attempts the configured HTTP endpoint unless mock
//! mode is on. Any failure (transport error, timeout, non-2xx status, or an
//! undecodable body) is logged and answered locally after a simulated delay.
//! There is no retry.

use crate::config::ApiConfig;
use crate::domain::{
    AdminStat, Backend, BalanceChange, ClientError, ClockPtr, LoginRequest, MetricsPtr,
    ParkingSpot, Repository, RepositoryPtr, Reservation, ReservationRequest, Role, Transaction,
    User,
};
use crate::infrastructure::fixtures;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;

macro_rules! api {
    ($base:expr, $($tt:tt)*) => {
        format!("{}/{}", $base, format!($($tt)*))
    };
}

/// Simulated latency per operation, before scaling.
mod latency {
    // ---
    pub const LOGIN_MS: u64 = 800;
    pub const SPOTS_MS: u64 = 500;
    pub const RESERVATION_MS: u64 = 1_500;
    pub const RESERVATIONS_MS: u64 = 300;
    pub const TRANSACTIONS_MS: u64 = 400;
    pub const STATS_MS: u64 = 600;
    pub const BALANCE_MS: u64 = 1_000;
}

pub struct MockBackendClient {
    // ---
    http: reqwest::Client,
    config: ApiConfig,
    repository: RepositoryPtr,
    metrics: MetricsPtr,
    clock: ClockPtr,
}

impl std::fmt::Debug for MockBackendClient {
    // ---
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MockBackendClient {{ base_url: {}, mock_mode: {} }}",
            self.config.base_url, self.config.mock_mode
        )
    }
}

impl MockBackendClient {
    // ---
    pub fn new(
        config: ApiConfig,
        repository: RepositoryPtr,
        metrics: MetricsPtr,
        clock: ClockPtr,
    ) -> Result<Self> {
        // ---
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            repository,
            metrics,
            clock,
        })
    }

    /// Sends `request` and decodes a JSON body, or returns `None` on any
    /// failure (including mock mode).
    async fn try_http<T>(&self, operation: &str, request: reqwest::RequestBuilder) -> Option<T>
    where
        T: DeserializeOwned,
    {
        // ---
        if self.config.mock_mode {
            return None;
        }

        let result: Result<T, reqwest::Error> = async {
            let res = request.send().await?.error_for_status()?;
            res.json::<T>().await
        }
        .await;

        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("{} unavailable, using mock data: {}", operation, err);
                self.metrics.record_backend_fallback(operation);
                None
            }
        }
    }

    async fn simulate_latency(&self, base_ms: u64) {
        // ---
        let scaled = (base_ms as f64 * self.config.mock_delay_scale).round() as u64;
        if scaled > 0 {
            tokio::time::sleep(Duration::from_millis(scaled)).await;
        }
    }
}

#[async_trait::async_trait]
impl Backend for MockBackendClient {
    // ---
    #[tracing::instrument(skip(self))]
    async fn login(&self, email: &str, role: Role) -> Result<User> {
        // ---
        let body = LoginRequest {
            email: email.to_string(),
            role,
        };
        let request = self.http.post(api!(self.config.base_url, "auth/login")).json(&body);
        if let Some(user) = self.try_http("login", request).await {
            return Ok(user);
        }

        self.simulate_latency(latency::LOGIN_MS).await;
        Ok(fixtures::profile_for(email, role))
    }

    #[tracing::instrument(skip(self))]
    async fn list_spots(&self) -> Result<Vec<ParkingSpot>> {
        // ---
        let request = self.http.get(api!(self.config.base_url, "spots"));
        if let Some(spots) = self.try_http("list_spots", request).await {
            return Ok(spots);
        }

        self.simulate_latency(latency::SPOTS_MS).await;
        Ok(fixtures::parking_spots())
    }

    #[tracing::instrument(skip(self, request), fields(spot_id = %request.spot_id))]
    async fn create_reservation(&self, request: ReservationRequest) -> Result<Reservation> {
        // ---
        let http_request = self
            .http
            .post(api!(self.config.base_url, "reservations"))
            .json(&request);
        if let Some(reservation) = self.try_http("create_reservation", http_request).await {
            self.metrics.record_reservation_created();
            return Ok(reservation);
        }

        self.simulate_latency(latency::RESERVATION_MS).await;

        let spot = fixtures::find_spot(&request.spot_id)
            .ok_or_else(|| ClientError::SpotNotFound(request.spot_id.clone()))?;

        let reservation =
            fixtures::new_reservation(&spot, &request, self.clock.now(), self.clock.local_hour());
        tracing::info!(
            "Reservation {} for {} ({} UZS)",
            reservation.id,
            spot.id,
            reservation.total_price
        );
        self.metrics.record_reservation_created();

        Ok(reservation)
    }

    #[tracing::instrument(skip(self))]
    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>> {
        // ---
        let request = self
            .http
            .get(api!(self.config.base_url, "reservations/{user_id}"));
        if let Some(reservations) = self.try_http("list_reservations", request).await {
            return Ok(reservations);
        }

        self.simulate_latency(latency::RESERVATIONS_MS).await;
        let saved = self.repository.load_reservations().await;
        Ok(saved
            .into_iter()
            .filter(|r| r.user_id.is_empty() || r.user_id == user_id)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        // ---
        let request = self
            .http
            .get(api!(self.config.base_url, "transactions/{user_id}"));
        if let Some(transactions) = self.try_http("list_transactions", request).await {
            return Ok(transactions);
        }

        self.simulate_latency(latency::TRANSACTIONS_MS).await;
        Ok(fixtures::transactions())
    }

    #[tracing::instrument(skip(self))]
    async fn get_admin_stats(&self) -> Result<Vec<AdminStat>> {
        // ---
        let request = self.http.get(api!(self.config.base_url, "admin/stats"));
        if let Some(stats) = self.try_http("get_admin_stats", request).await {
            return Ok(stats);
        }

        self.simulate_latency(latency::STATS_MS).await;
        Ok(fixtures::admin_stats())
    }

    #[tracing::instrument(skip(self))]
    async fn update_balance(&self, user_id: &str, amount: i64, kind: BalanceChange) -> Result<i64> {
        // ---
        // The backend exposes no wallet endpoint; this is always local.
        self.simulate_latency(latency::BALANCE_MS).await;

        let delta = match kind {
            BalanceChange::Deposit => amount,
            BalanceChange::Withdraw => -amount,
        };
        tracing::debug!("Balance change for {}: {}", user_id, delta);

        Ok(delta)
    }
}
