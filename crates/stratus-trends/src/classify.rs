//! Time-series trend classification.
//!
//! Given an hourly (or daily) series of readings with possible gaps, compute
//! a least-squares slope and the volatility of step-to-step changes, then map
//! those statistics to a qualitative label. The label text is shown to the
//! user verbatim ("AQI: 42 and is gradually increasing.").

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slope magnitudes below this count as flat (rule 1).
pub const FLAT_SLOPE_MAX: f64 = 0.1;

/// Step volatility below this, together with a flat slope, reads as constant.
pub const FLAT_STD_DEV_MAX: f64 = 0.5;

/// Step volatility at or above this turns a gradual trend into a rapid one.
pub const RAPID_STD_DEV_MIN: f64 = 2.0;

/// Fraction of steps that must reverse direction for a series to read as
/// fluctuating.
pub const FLUCTUATION_RATIO: f64 = 0.3;

/// Qualitative trend of a sampled series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than two usable samples; no statistics were computed.
    InsufficientData,
    Constant,
    GraduallyIncreasing,
    RapidlyIncreasing,
    GraduallyDecreasing,
    RapidlyDecreasing,
    Fluctuating,
    /// No rule matched; carries the caller's reference reading for display.
    Unclear { reference: f64 },
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::InsufficientData => write!(f, "Insufficient data"),
            Trend::Constant => write!(f, "staying constant."),
            Trend::GraduallyIncreasing => write!(f, "gradually increasing."),
            Trend::RapidlyIncreasing => write!(f, "rapidly increasing."),
            Trend::GraduallyDecreasing => write!(f, "gradually decreasing."),
            Trend::RapidlyDecreasing => write!(f, "rapidly decreasing."),
            Trend::Fluctuating => write!(f, "fluctuating."),
            Trend::Unclear { reference } => {
                write!(f, "Trend is unclear for initial value {}.", reference)
            }
        }
    }
}

/// Classify a time-ordered series of samples.
///
/// `series` is evenly spaced in time; `None` marks a missing sample and is
/// skipped without shifting the remaining values. `reference` is the reading
/// the caller wants contextualized (usually the current value); it only
/// appears in the [`Trend::Unclear`] fallback and never enters the
/// statistics.
///
/// Rules are evaluated in a fixed priority order: flat, then
/// increasing/decreasing split by volatility, then fluctuation. A series
/// with a nonzero slope is therefore always reported as trending, however
/// often it reverses direction.
pub fn classify(series: &[Option<f64>], reference: f64) -> Trend {
    let values: Vec<f64> = series.iter().copied().flatten().collect();
    if values.len() < 2 {
        return Trend::InsufficientData;
    }

    let slope = least_squares_slope(&values);

    // Step-to-step changes; n >= 2 guarantees at least one.
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_change = diffs.iter().sum::<f64>() / diffs.len() as f64;
    let variance = diffs
        .iter()
        .map(|d| (d - mean_change) * (d - mean_change))
        .sum::<f64>()
        / diffs.len() as f64;
    let std_dev = variance.sqrt();

    // A reversal is a strictly negative product of adjacent changes; a zero
    // change neither continues nor breaks a run.
    let sign_changes = diffs.windows(2).filter(|w| w[0] * w[1] < 0.0).count();

    if slope.abs() < FLAT_SLOPE_MAX && std_dev < FLAT_STD_DEV_MAX {
        return Trend::Constant;
    }
    if slope > 0.0 && std_dev < RAPID_STD_DEV_MIN {
        return Trend::GraduallyIncreasing;
    }
    if slope > 0.0 && std_dev >= RAPID_STD_DEV_MIN {
        return Trend::RapidlyIncreasing;
    }
    if slope < 0.0 && std_dev < RAPID_STD_DEV_MIN {
        return Trend::GraduallyDecreasing;
    }
    if slope < 0.0 && std_dev >= RAPID_STD_DEV_MIN {
        return Trend::RapidlyDecreasing;
    }
    if sign_changes as f64 > FLUCTUATION_RATIO * diffs.len() as f64 {
        return Trend::Fluctuating;
    }

    Trend::Unclear { reference }
}

/// Ordinary least-squares slope of `values` against their indices 0..n-1.
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn present(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        assert_eq!(classify(&[], 0.0), Trend::InsufficientData);
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        assert_eq!(classify(&present(&[3.0]), 3.0), Trend::InsufficientData);
    }

    #[test]
    fn test_all_missing_is_insufficient() {
        assert_eq!(classify(&[None, None, None], 0.0), Trend::InsufficientData);
    }

    #[test]
    fn test_one_present_among_missing_is_insufficient() {
        assert_eq!(classify(&[None, Some(4.0), None], 4.0), Trend::InsufficientData);
    }

    #[test]
    fn test_unit_steps_read_gradually_increasing() {
        let series = present(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(classify(&series, 1.0), Trend::GraduallyIncreasing);
    }

    #[test]
    fn test_constant_series() {
        let series = present(&[5.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(classify(&series, 5.0), Trend::Constant);
    }

    #[test]
    fn test_unit_steps_down_read_gradually_decreasing() {
        let series = present(&[10.0, 9.0, 8.0, 7.0, 6.0]);
        assert_eq!(classify(&series, 10.0), Trend::GraduallyDecreasing);
    }

    #[test]
    fn test_noisy_climb_reads_rapidly_increasing() {
        let series = present(&[0.0, 10.0, 5.0, 20.0, 10.0, 30.0]);
        assert_eq!(classify(&series, 0.0), Trend::RapidlyIncreasing);
    }

    #[test]
    fn test_noisy_fall_reads_rapidly_decreasing() {
        let series = present(&[30.0, 20.0, 25.0, 10.0, 20.0, 0.0]);
        assert_eq!(classify(&series, 30.0), Trend::RapidlyDecreasing);
    }

    #[test]
    fn test_balanced_alternation_reads_fluctuating() {
        // Symmetric, so the fitted slope is exactly zero and the sign-change
        // rule is reached: 3 reversals out of 4 steps.
        let series = present(&[1.0, 10.0, 1.0, 10.0, 1.0]);
        assert_eq!(classify(&series, 1.0), Trend::Fluctuating);
    }

    #[test]
    fn test_trend_rules_win_over_fluctuation() {
        // Ends on a high sample, so the slope is positive and the series
        // reads as increasing even though every step reverses direction.
        let series = present(&[1.0, 10.0, 1.0, 10.0, 1.0, 10.0]);
        assert_eq!(classify(&series, 1.0), Trend::RapidlyIncreasing);
    }

    #[test]
    fn test_missing_samples_are_skipped_not_zero_filled() {
        let gappy = [Some(1.0), None, Some(3.0), None, Some(5.0)];
        let dense = present(&[1.0, 3.0, 5.0]);
        assert_eq!(classify(&gappy, 1.0), classify(&dense, 1.0));
        assert_eq!(classify(&gappy, 1.0), Trend::GraduallyIncreasing);
    }

    #[test]
    fn test_zero_change_is_not_a_reversal() {
        // Slope is exactly zero and every adjacent-change product is zero,
        // so no rule matches; if zero products counted as reversals this
        // would read as fluctuating instead.
        let series = present(&[0.0, 3.0, 3.0, 0.0]);
        assert_eq!(classify(&series, 0.0), Trend::Unclear { reference: 0.0 });
    }

    #[test]
    fn test_unclear_carries_reference() {
        // Zero slope, volatile steps, no reversals.
        let series = present(&[0.0, 0.0, 4.0, 4.0, 0.0, 0.0]);
        assert_eq!(classify(&series, 7.5), Trend::Unclear { reference: 7.5 });
    }

    #[test]
    fn test_classify_is_pure() {
        let series = present(&[2.0, 4.0, 3.0, 5.0]);
        assert_eq!(classify(&series, 2.0), classify(&series, 2.0));
    }

    #[test]
    fn test_display_phrases() {
        assert_eq!(Trend::InsufficientData.to_string(), "Insufficient data");
        assert_eq!(Trend::Constant.to_string(), "staying constant.");
        assert_eq!(Trend::GraduallyIncreasing.to_string(), "gradually increasing.");
        assert_eq!(Trend::RapidlyIncreasing.to_string(), "rapidly increasing.");
        assert_eq!(Trend::GraduallyDecreasing.to_string(), "gradually decreasing.");
        assert_eq!(Trend::RapidlyDecreasing.to_string(), "rapidly decreasing.");
        assert_eq!(Trend::Fluctuating.to_string(), "fluctuating.");
        assert_eq!(
            Trend::Unclear { reference: 7.5 }.to_string(),
            "Trend is unclear for initial value 7.5."
        );
    }

    #[test]
    fn test_trend_serializes_for_presentation() {
        let json = serde_json::to_string(&Trend::GraduallyIncreasing).unwrap();
        assert_eq!(json, "\"gradually_increasing\"");
    }
}
