// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the client session
//! and the fixture backend server. Configuration is validated eagerly and
//! failures are treated as deployment errors rather than recoverable runtime
//! conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: api::ApiConfig,
    pub storage: storage::StorageConfig,
    pub simulator: simulator::SimulatorConfig,
    pub weather: weather::WeatherConfig,
    pub server: server::ServerConfig,
    pub booking: booking::BookingConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            api: api::ApiConfig::from_env()?,
            storage: storage::StorageConfig::from_env()?,
            simulator: simulator::SimulatorConfig::from_env()?,
            weather: weather::WeatherConfig::from_env()?,
            server: server::ServerConfig::from_env()?,
            booking: booking::BookingConfig::from_env()?,
        })
    }
}

// ============================================================
// Backend API configuration
// ============================================================

mod api {
    // ---
    use super::*;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

    /// How the client reaches (or pretends to reach) the backend.
    #[derive(Debug, Clone)]
    pub struct ApiConfig {
        /// Prefix of every backend route. Defaults to `http://localhost:5000/api`.
        pub base_url: String,

        /// Skip HTTP entirely and answer from fixtures. Defaults to true.
        pub mock_mode: bool,

        /// Upper bound for one HTTP attempt before falling back. Defaults to 5 seconds.
        pub http_timeout: Duration,

        /// Factor applied to the simulated latency; 0 disables it. Defaults to 1.0.
        pub mock_delay_scale: f64,
    }

    impl Default for ApiConfig {
        // ---
        fn default() -> Self {
            // ---
            Self {
                base_url: DEFAULT_BASE_URL.to_string(),
                mock_mode: true,
                http_timeout: Duration::from_millis(5_000),
                mock_delay_scale: 1.0,
            }
        }
    }

    impl ApiConfig {
        /// Builds an [`ApiConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            let defaults = Self::default();

            let base_url =
                std::env::var("PARKING_API_BASE_URL").unwrap_or(defaults.base_url);
            let mock_mode = optional_env_parse!("PARKING_MOCK_MODE", bool, defaults.mock_mode);
            let timeout_ms = optional_env_parse!("PARKING_HTTP_TIMEOUT_MS", u64, 5_000);
            let mock_delay_scale =
                optional_env_parse!("PARKING_MOCK_DELAY_SCALE", f64, defaults.mock_delay_scale);

            if mock_delay_scale < 0.0 {
                anyhow::bail!("PARKING_MOCK_DELAY_SCALE must not be negative");
            }

            Ok(Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                mock_mode,
                http_timeout: Duration::from_millis(timeout_ms),
                mock_delay_scale,
            })
        }
    }
}
pub use api::ApiConfig;

// ============================================================
// Storage configuration
// ============================================================

mod storage {
    // ---
    use super::*;

    /// Where persisted client state lives.
    #[derive(Debug, Clone)]
    pub struct StorageConfig {
        /// Directory holding one JSON file per persisted key.
        pub dir: PathBuf,
    }

    impl StorageConfig {
        /// Builds a [`StorageConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `PARKING_STORAGE_DIR` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let dir = required_env!("PARKING_STORAGE_DIR");
            Ok(Self {
                dir: PathBuf::from(dir),
            })
        }
    }
}
pub use storage::StorageConfig;

// ============================================================
// Availability simulator configuration
// ============================================================

mod simulator {
    // ---
    use super::*;

    #[derive(Debug, Clone)]
    pub struct SimulatorConfig {
        /// Time between ticks. Defaults to 5 seconds.
        pub interval: Duration,

        /// Chance that a given spot changes on a tick. Defaults to 0.7.
        pub change_probability: f64,
    }

    impl Default for SimulatorConfig {
        // ---
        fn default() -> Self {
            // ---
            Self {
                interval: Duration::from_millis(5_000),
                change_probability: 0.7,
            }
        }
    }

    impl SimulatorConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            let interval_ms = optional_env_parse!("PARKING_SIMULATOR_INTERVAL_MS", u64, 5_000);
            let change_probability =
                optional_env_parse!("PARKING_SIMULATOR_CHANGE_PROBABILITY", f64, 0.7);

            if !(0.0..=1.0).contains(&change_probability) {
                anyhow::bail!("PARKING_SIMULATOR_CHANGE_PROBABILITY must be within [0, 1]");
            }
            if interval_ms == 0 {
                anyhow::bail!("PARKING_SIMULATOR_INTERVAL_MS must be positive");
            }

            Ok(Self {
                interval: Duration::from_millis(interval_ms),
                change_probability,
            })
        }
    }
}
pub use simulator::SimulatorConfig;

// ============================================================
// Weather configuration
// ============================================================

mod weather {
    // ---
    use super::*;

    pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

    #[derive(Debug, Clone)]
    pub struct WeatherConfig {
        /// Forecast endpoint queried with `latitude`/`longitude`.
        pub url: String,

        /// Defaults to Tashkent.
        pub lat: f64,
        pub lng: f64,

        /// Defaults to 5 minutes.
        pub poll_interval: Duration,
    }

    impl Default for WeatherConfig {
        // ---
        fn default() -> Self {
            // ---
            Self {
                url: DEFAULT_WEATHER_URL.to_string(),
                lat: 41.31,
                lng: 69.24,
                poll_interval: Duration::from_secs(300),
            }
        }
    }

    impl WeatherConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            let defaults = Self::default();
            let poll_sec = optional_env_parse!("PARKING_WEATHER_POLL_SEC", u64, 300);

            if poll_sec == 0 {
                anyhow::bail!("PARKING_WEATHER_POLL_SEC must be positive");
            }

            Ok(Self {
                url: std::env::var("PARKING_WEATHER_URL").unwrap_or(defaults.url),
                lat: optional_env_parse!("PARKING_WEATHER_LAT", f64, defaults.lat),
                lng: optional_env_parse!("PARKING_WEATHER_LNG", f64, defaults.lng),
                poll_interval: Duration::from_secs(poll_sec),
            })
        }
    }
}
pub use weather::WeatherConfig;

// ============================================================
// Fixture server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Listen address of the fixture backend. Defaults to `127.0.0.1:5000`.
        pub bind_addr: String,

        /// `prom` or `noop`. Defaults to `noop`.
        pub metrics_type: String,
    }

    impl ServerConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                bind_addr: std::env::var("PARKING_BIND_ADDR")
                    .unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
                metrics_type: std::env::var("PARKING_METRICS_TYPE")
                    .unwrap_or_else(|_| "noop".to_string()),
            })
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Booking rules
// ============================================================

mod booking {
    // ---
    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct BookingConfig {
        /// Refuse bookings for spots showing zero free bays. Defaults to false.
        pub enforce_capacity: bool,
    }

    impl BookingConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                enforce_capacity: optional_env_parse!("PARKING_ENFORCE_CAPACITY", bool, false),
            })
        }
    }
}
pub use booking::BookingConfig;

// ============================================================
// Tests
// ============================================================
