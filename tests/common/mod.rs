// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use smart_parking::domain::{MetricsPtr, SystemClock};
use smart_parking::{create_noop_metrics, create_router_with, ApiConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

macro_rules! set_env_if_unset {
    // ---
    ($key:expr, $val:expr) => {
        if std::env::var($key).is_err() {
            std::env::set_var($key, $val);
        }
    };
}

// ============================================================================
// Test Setup
// ============================================================================

/// Points the required environment at a throwaway storage directory.
pub fn setup_test_env() {
    // ---
    let dir = std::env::temp_dir().join("smart-parking-tests");
    set_env_if_unset!("PARKING_STORAGE_DIR", dir.as_os_str());
    set_env_if_unset!("PARKING_METRICS_TYPE", "noop");
}

/// Client configuration for talking to `base_url` with no simulated delay.
pub fn live_api(base_url: &str) -> ApiConfig {
    // ---
    ApiConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        mock_mode: false,
        http_timeout: Duration::from_secs(2),
        mock_delay_scale: 0.0,
    }
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // ---
        Self::with_metrics(create_noop_metrics().expect("noop metrics")).await
    }

    pub async fn with_metrics(metrics: MetricsPtr) -> Self {
        // ---
        // Enable logging only when requested
        if std::env::var("TEST_DEBUG").is_ok() {
            tracing_subscriber::fmt().with_test_writer().try_init().ok();
        }

        let app = create_router_with(metrics, Arc::new(SystemClock));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    /// Base URL the client's backend should use.
    pub fn api_base(&self) -> String {
        self.url("/api")
    }
}
