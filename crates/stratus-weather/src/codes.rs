//! WMO weather-code presentation table.
//!
//! Maps the `weather_code` reported by Open-Meteo to a display label, an
//! icon bucket, and the hourly chart group relevant to those conditions.
//! The mapping is a static table so the rule set can be audited as data;
//! any code outside every entry resolves to the unknown fallback.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Icon bucket for a weather code. Day/night variants are selected at
/// render time from `is_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

/// Hourly columns (and their line colors) charted for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGroup {
    pub title: &'static str,
    pub keys: &'static [&'static str],
    pub colors: &'static [&'static str],
}

/// Presentation record for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub icon: IconKind,
    pub chart: Option<&'static ChartGroup>,
}

const SOLAR_CHART: ChartGroup = ChartGroup {
    title: "Direct Solar Radiation and UV Index",
    keys: &["direct_radiation", "uv_index"],
    colors: &["#ffcc00", "#ff9900"],
};

const VISIBILITY_CHART: ChartGroup = ChartGroup {
    title: "Visibility",
    keys: &["visibility"],
    colors: &["#66ccff"],
};

const RAIN_CHART: ChartGroup = ChartGroup {
    title: "Rainfall & Showers",
    keys: &["rain", "showers"],
    colors: &["#0099ff", "#0066cc"],
};

const SNOW_CHART: ChartGroup = ChartGroup {
    title: "Snowfall & Snow Depth",
    keys: &["snowfall", "snow_depth"],
    colors: &["#ffffff", "#cccccc"],
};

const WIND_CHART: ChartGroup = ChartGroup {
    title: "Wind Speed & Wind Gusts",
    keys: &["wind_speed_120m", "wind_gusts_10m"],
    colors: &["#ff4500", "#cc3300"],
};

/// One table row: the WMO codes in the bucket and their presentation.
struct Entry {
    codes: &'static [u16],
    condition: Condition,
}

const TABLE: &[Entry] = &[
    Entry {
        codes: &[0],
        condition: Condition {
            label: "Clear sky",
            icon: IconKind::Clear,
            chart: Some(&SOLAR_CHART),
        },
    },
    Entry {
        codes: &[1, 2, 3],
        condition: Condition {
            label: "Partly cloudy",
            icon: IconKind::PartlyCloudy,
            chart: Some(&SOLAR_CHART),
        },
    },
    Entry {
        codes: &[45, 48],
        condition: Condition {
            label: "Fog",
            icon: IconKind::Fog,
            chart: Some(&VISIBILITY_CHART),
        },
    },
    Entry {
        codes: &[51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82],
        condition: Condition {
            label: "Rain and showers",
            icon: IconKind::Rain,
            chart: Some(&RAIN_CHART),
        },
    },
    Entry {
        codes: &[71, 73, 75, 85, 86],
        condition: Condition {
            label: "Snow",
            icon: IconKind::Snow,
            chart: Some(&SNOW_CHART),
        },
    },
    Entry {
        codes: &[95, 96, 99],
        condition: Condition {
            label: "Thunderstorm",
            icon: IconKind::Thunderstorm,
            chart: Some(&WIND_CHART),
        },
    },
];

const UNKNOWN: Condition = Condition {
    label: "Unknown conditions",
    icon: IconKind::Unknown,
    chart: None,
};

impl Condition {
    /// Look up the presentation record for a WMO weather code.
    pub fn for_code(code: u16) -> &'static Condition {
        TABLE
            .iter()
            .find(|entry| entry.codes.contains(&code))
            .map(|entry| &entry.condition)
            .unwrap_or(&UNKNOWN)
    }
}
