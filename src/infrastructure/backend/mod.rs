mod mock_client;

pub use mock_client::MockBackendClient;

use crate::config::ApiConfig;
use crate::domain::{BackendPtr, ClockPtr, MetricsPtr, RepositoryPtr};
use anyhow::Result;
use std::sync::Arc;

/// Creates the HTTP-first backend client with fixture fallback.
pub fn create_backend(
    config: ApiConfig,
    repository: RepositoryPtr,
    metrics: MetricsPtr,
    clock: ClockPtr,
) -> Result<BackendPtr> {
    // ---
    tracing::info!(
        "Backend at {} (mock mode: {})",
        config.base_url,
        config.mock_mode
    );
    Ok(Arc::new(MockBackendClient::new(
        config, repository, metrics, clock,
    )?))
}
