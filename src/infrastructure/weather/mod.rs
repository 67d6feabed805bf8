//! Forecast service client.

use crate::config::WeatherConfig;
use crate::domain::weather::WeatherReading;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    // ---
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    // ---
    temperature: f64,
    weathercode: u32,
    #[serde(default = "default_is_day")]
    is_day: u8,
}

fn default_is_day() -> u8 {
    1
}

pub struct WeatherClient {
    // ---
    http: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    // ---
    pub fn new(config: WeatherConfig) -> Result<Self> {
        // ---
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { http, config })
    }

    /// Fetches the current conditions at the configured coordinate.
    #[tracing::instrument(skip(self))]
    pub async fn current(&self) -> Result<WeatherReading> {
        // ---
        let lat = self.config.lat.to_string();
        let lng = self.config.lng.to_string();

        let body: ForecastResponse = self
            .http
            .get(&self.config.url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lng.as_str()),
                ("current_weather", "true"),
                ("timezone", "auto"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let cw = body.current_weather;
        Ok(WeatherReading::new(cw.temperature, cw.weathercode, cw.is_day == 1))
    }

    /// Like [`current`](Self::current) but logs and swallows failures.
    pub async fn poll(&self) -> Option<WeatherReading> {
        // ---
        match self.current().await {
            Ok(reading) => Some(reading),
            Err(err) => {
                tracing::error!("Weather fetch failed: {:?}", err);
                None
            }
        }
    }
}
