//! Weather-service error types.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Empty search query")]
    InvalidQuery,

    #[error("Coordinates out of range: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Request timed out")]
    Timeout,

    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly message suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidQuery => "Enter a place name to search for.",
            Self::InvalidCoordinates { .. } => {
                "That location is outside the valid coordinate range."
            }
            Self::Timeout => "The request timed out. Please try again.",
            Self::ClientError { .. } => "The request failed. Please try again.",
            Self::ServerError { .. } => {
                "The weather service is having issues. Please try again later."
            }
            Self::Parse(_) => "Received an unexpected response. Please try again.",
            Self::Store(_) => "Local storage error.",
            Self::Network(_) => "Network error. Check your connection.",
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::ServerError { .. } | Self::Network(_)
        )
    }

    /// Map a failed `send()` to the error taxonomy.
    pub(crate) fn from_request_error(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error)
        }
    }

    /// Map a non-success HTTP status to the error taxonomy.
    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        if status.is_client_error() {
            Self::ClientError {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::ServerError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl From<rusqlite::Error> for WeatherError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store(error.to_string())
    }
}
