//! Geocoding search: resolve a place name to candidate coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::WeatherError;
use crate::retry::{with_retry, RetryConfig};
use crate::types::Coordinates;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// A candidate place returned by the geocoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// First-level administrative area (state, province).
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Place {
    /// Validated coordinates of this place.
    pub fn coordinates(&self) -> Result<Coordinates, WeatherError> {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Name, admin1, country" with empty parts dropped.
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(admin1) = self.admin1.as_ref().filter(|a| !a.is_empty()) {
            parts.push(admin1.clone());
        }
        if let Some(country) = self.country.as_ref().filter(|c| !c.is_empty()) {
            parts.push(country.clone());
        }
        parts.join(", ")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent entirely when the query matches nothing.
    results: Option<Vec<Place>>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl GeocodeClient {
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

    /// Search for places matching `name`. Empty or whitespace-only queries
    /// are rejected before any request is made.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, name: &str) -> Result<Vec<Place>, WeatherError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(WeatherError::InvalidQuery);
        }

        let response = with_retry(&self.retry, || {
            self.client
                .get(&self.base_url)
                .query(&[("name", query)])
                .send()
        })
        .await
        .map_err(WeatherError::from_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::from_status(status, message));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(body.results.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_returns_places() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("name", "Pune"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {
                        "name": "Pune",
                        "latitude": 18.52,
                        "longitude": 73.86,
                        "country": "India",
                        "admin1": "Maharashtra",
                        "timezone": "Asia/Kolkata"
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri()).unwrap();
        let places = client.search("Pune").await.unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Pune");
        assert_eq!(places[0].display_name(), "Pune, Maharashtra, India");
        let coords = places[0].coordinates().unwrap();
        assert_eq!(coords.latitude, 18.52);
    }

    #[tokio::test]
    async fn test_search_without_results_field_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.5})),
            )
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri()).unwrap();
        let places = client.search("Nowhereville").await.unwrap();

        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected_without_a_request() {
        let mock_server = MockServer::start().await;

        // Any request at all would fail the mock's expectation.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(&mock_server.uri()).unwrap();
        let err = client.search("   ").await.unwrap_err();

        assert!(matches!(err, WeatherError::InvalidQuery));
    }

    #[test]
    fn test_display_name_skips_empty_parts() {
        let place = Place {
            name: "Singapore".into(),
            latitude: 1.29,
            longitude: 103.85,
            country: Some("Singapore".into()),
            admin1: Some(String::new()),
            timezone: None,
        };
        assert_eq!(place.display_name(), "Singapore, Singapore");
    }
}
