//! Display bands derived from a baseline's mean and standard deviation.

use serde::{Deserialize, Serialize};

/// Half-width of a display band, in standard deviations
pub const RANGE_SD_MULTIPLIER: f64 = 1.5;

/// UV index is never displayed below this
pub const MIN_DISPLAY_UV: f64 = 1.0;

/// Round to `decimals` places with halves going toward positive infinity
/// (-20.5 rounds to -20, 20.5 to 21). Negative zero is normalized so
/// displayed values never read "-0".
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor + 0.5).floor() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Band of typical values for a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ValueRange {
    /// Unrounded band: mean ± 1.5 SD
    pub fn from_moments(mean: f64, sd: f64) -> Self {
        let half_width = RANGE_SD_MULTIPLIER * sd;
        Self {
            min: mean - half_width,
            max: mean + half_width,
            avg: mean,
        }
    }

    /// Temperature band, whole degrees
    pub fn temperature(mean: f64, sd: f64) -> Self {
        Self::from_moments(mean, sd).map(|v| round_to(v, 0))
    }

    /// Precipitation band, whole percentage points
    pub fn precipitation(mean: f64, sd: f64) -> Self {
        Self::from_moments(mean, sd).map(|v| round_to(v, 0))
    }

    /// UV band, one decimal, every value floored at [`MIN_DISPLAY_UV`]
    pub fn uv(mean: f64, sd: f64) -> Self {
        Self::from_moments(mean, sd).map(|v| round_to(v, 1).max(MIN_DISPLAY_UV))
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            min: f(self.min),
            max: f(self.max),
            avg: f(self.avg),
        }
    }
}
