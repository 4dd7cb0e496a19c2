//! Weather data access for Stratus
//!
//! Open-Meteo clients for geocoding search, forecast, and air quality, the
//! WMO weather-code presentation table, and a coordinate-keyed snapshot
//! store.

pub mod air_quality;
pub mod codes;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod retry;
pub mod store;
pub mod types;

pub use air_quality::{AirQuality, AirQualityClient, DEFAULT_AIR_QUALITY_URL};
pub use codes::{ChartGroup, Condition, IconKind};
pub use error::WeatherError;
pub use forecast::{Forecast, ForecastClient, DEFAULT_FORECAST_URL};
pub use geocode::{GeocodeClient, Place, DEFAULT_GEOCODING_URL};
pub use store::{SnapshotStore, StoreOutcome};
pub use types::{compass_point, Coordinates};
