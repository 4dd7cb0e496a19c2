//! Open-Meteo forecast client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::WeatherError;
use crate::retry::{with_retry, RetryConfig};
use crate::types::Coordinates;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,is_day,weather_code,\
                              wind_speed_10m,wind_direction_10m,cloud_cover,\
                              relative_humidity_2m,pressure_msl";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation_probability,\
                             rain,showers,snowfall,snow_depth,visibility,uv_index,\
                             direct_radiation,wind_speed_120m,wind_gusts_10m";
const DAILY_FIELDS: &str = "uv_index_max,temperature_2m_max,temperature_2m_min,\
                            apparent_temperature_max,apparent_temperature_min,sunrise,sunset,\
                            daylight_duration,sunshine_duration,wind_speed_10m_max,\
                            wind_gusts_10m_max,wind_direction_10m_dominant";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl ForecastClient {
    /// Create a client against the given forecast endpoint.
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

    /// Fetch current conditions, the next 24 hourly samples, and the daily
    /// summary for the given coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coords: Coordinates) -> Result<Forecast, WeatherError> {
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
                    ("daily", DAILY_FIELDS),
                    ("forecast_hours", "24"),
                    ("cell_selection", "nearest"),
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

/// Forecast payload for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
    pub daily: DailySummary,
}

/// Current conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub time: String,
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub is_day: u8,
    pub weather_code: u16,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub cloud_cover: f64,
    pub relative_humidity_2m: f64,
    pub pressure_msl: f64,
}

/// Hourly columns as parallel arrays. Upstream reports missing samples as
/// null, so every value column is `Option<f64>` and feeds the trend
/// classifier unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub rain: Vec<Option<f64>>,
    #[serde(default)]
    pub showers: Vec<Option<f64>>,
    #[serde(default)]
    pub snowfall: Vec<Option<f64>>,
    #[serde(default)]
    pub snow_depth: Vec<Option<f64>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index: Vec<Option<f64>>,
    #[serde(default)]
    pub direct_radiation: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_120m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Resolve a chart-group key to its column, for charting and trend
    /// classification.
    pub fn series(&self, key: &str) -> Option<&[Option<f64>]> {
        let column = match key {
            "temperature_2m" => &self.temperature_2m,
            "relative_humidity_2m" => &self.relative_humidity_2m,
            "precipitation_probability" => &self.precipitation_probability,
            "rain" => &self.rain,
            "showers" => &self.showers,
            "snowfall" => &self.snowfall,
            "snow_depth" => &self.snow_depth,
            "visibility" => &self.visibility,
            "uv_index" => &self.uv_index,
            "direct_radiation" => &self.direct_radiation,
            "wind_speed_120m" => &self.wind_speed_120m,
            "wind_gusts_10m" => &self.wind_gusts_10m,
            _ => return None,
        };
        Some(column.as_slice())
    }
}

/// Daily aggregates; one element per forecast day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
    #[serde(default)]
    pub daylight_duration: Vec<Option<f64>>,
    #[serde(default)]
    pub sunshine_duration: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m_dominant: Vec<Option<f64>>,
}
