//! Shared value types.

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate latitude in [-90, 90] and longitude in [-180, 180].
    /// Non-finite values fail the range checks.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates {
                lat: latitude,
                lon: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Eight-way compass point for a wind direction in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    if degrees >= 337.5 || degrees < 22.5 {
        return "North";
    }
    if (22.5..67.5).contains(&degrees) {
        return "North East";
    }
    if (67.5..112.5).contains(&degrees) {
        return "East";
    }
    if (112.5..157.5).contains(&degrees) {
        return "South East";
    }
    if (157.5..202.5).contains(&degrees) {
        return "South";
    }
    if (202.5..247.5).contains(&degrees) {
        return "South West";
    }
    if (247.5..292.5).contains(&degrees) {
        return "West";
    }
    if (292.5..337.5).contains(&degrees) {
        return "North West";
    }
    "Unknown direction"
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_coordinates_in_range() {
        let coords = Coordinates::new(47.6062, -122.3321).unwrap();
        assert_eq!(coords.latitude, 47.6062);
        assert_eq!(coords.longitude, -122.3321);
    }

    #[test]
    fn test_coordinates_boundaries_are_valid() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_coordinates_out_of_range() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(WeatherError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            Coordinates::new(0.0, -181.0),
            Err(WeatherError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_coordinates_reject_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(compass_point(0.0), "North");
        assert_eq!(compass_point(350.0), "North");
        assert_eq!(compass_point(45.0), "North East");
        assert_eq!(compass_point(90.0), "East");
        assert_eq!(compass_point(135.0), "South East");
        assert_eq!(compass_point(180.0), "South");
        assert_eq!(compass_point(225.0), "South West");
        assert_eq!(compass_point(270.0), "West");
        assert_eq!(compass_point(315.0), "North West");
    }

    #[test]
    fn test_compass_unknown_for_non_finite_input() {
        assert_eq!(compass_point(f64::NAN), "Unknown direction");
    }
}
