//! Open-Meteo air-quality client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::WeatherError;
use crate::retry::{with_retry, RetryConfig};
use crate::types::Coordinates;

pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

const CURRENT_FIELDS: &str = "us_aqi,pm2_5,dust";
const HOURLY_FIELDS: &str = "pm10,pm2_5,dust";

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl AirQualityClient {
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    /// Fetch the current AQI readings and the hourly particulate series.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coords: Coordinates) -> Result<AirQuality, WeatherError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        let response = with_retry(&self.retry, || {
            self.client
                .get(&self.base_url)
                .query(&[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", CURRENT_FIELDS),
                    ("hourly", HOURLY_FIELDS),
                ])
                .send()
        })
        .await
        .map_err(WeatherError::from_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::from_status(status, message));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

/// Air-quality payload for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentAirQuality,
    pub hourly: AirQualityHourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAirQuality {
    pub time: String,
    #[serde(default)]
    pub us_aqi: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub dust: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityHourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub pm10: Vec<Option<f64>>,
    #[serde(default)]
    pub pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    pub dust: Vec<Option<f64>>,
}
