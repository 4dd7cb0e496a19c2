//! Trend classification for Stratus
//!
//! Classifies a time-ordered series of samples (with gaps) into a small set
//! of qualitative labels suitable for direct display next to a reading.

pub mod classify;

pub use classify::{
    classify, Trend, FLAT_SLOPE_MAX, FLAT_STD_DEV_MAX, FLUCTUATION_RATIO, RAPID_STD_DEV_MIN,
};
