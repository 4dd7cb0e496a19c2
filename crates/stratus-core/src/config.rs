use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// One-line summary of all errors.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Upstream data sources
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Snapshot store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Base URLs and timeout for the upstream APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub geocoding_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            forecast_url: stratus_weather::DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: stratus_weather::DEFAULT_AIR_QUALITY_URL.to_string(),
            geocoding_url: stratus_weather::DEFAULT_GEOCODING_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Keep a local snapshot of each looked-up location
    pub enabled: bool,

    /// Database file name, relative to the config directory
    pub db_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            db_file: "snapshots.db".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stratus");

        Self {
            config_dir,
            sources: SourcesConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating the default if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration and fail on validation errors; warnings are logged.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.sources.forecast_url, "sources.forecast_url", &mut result);
        validate_url(
            &self.sources.air_quality_url,
            "sources.air_quality_url",
            &mut result,
        );
        validate_url(
            &self.sources.geocoding_url,
            "sources.geocoding_url",
            &mut result,
        );

        if self.sources.timeout_secs == 0 {
            result.add_error("sources.timeout_secs", "Timeout must be greater than 0");
        } else if self.sources.timeout_secs > 60 {
            result.add_warning("sources.timeout_secs", "Timeout is unusually long (>60s)");
        }

        if self.store.enabled && self.store.db_file.is_empty() {
            result.add_error("store.db_file", "Database file name must not be empty");
        }

        result
    }

    /// Absolute path of the snapshot database.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(&self.store.db_file)
    }

    /// Save the configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Path to the configuration file.
    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stratus")
            .join("config.toml")
    }
}

/// Validate a URL field: parseable, http(s), and with a host.
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_default_sources_point_at_open_meteo() {
        let sources = SourcesConfig::default();
        assert!(sources.forecast_url.contains("api.open-meteo.com"));
        assert!(sources.geocoding_url.contains("geocoding-api.open-meteo.com"));
    }

    #[test]
    fn test_invalid_url_fails_validation() {
        let mut config = Config::default();
        config.sources.forecast_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "sources.forecast_url"));
    }

    #[test]
    fn test_non_http_scheme_fails_validation() {
        let mut config = Config::default();
        config.sources.geocoding_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let mut config = Config::default();
        config.sources.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_store_path_joins_config_dir() {
        let config = Config::default();
        assert!(config.store_path().ends_with("snapshots.db"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sources.forecast_url, config.sources.forecast_url);
        assert_eq!(parsed.store.db_file, config.store.db_file);
    }
}
