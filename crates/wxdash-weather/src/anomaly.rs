//! Z-score based anomaly classification of forecast values.

use serde::{Deserialize, Serialize};

use crate::range::round_to;

/// A forecast value is anomalous when its z-score magnitude exceeds this.
/// Exactly 1.5 is not anomalous.
pub const ANOMALY_Z_THRESHOLD: f64 = 1.5;

/// Number of standard deviations `value` lies from `mean`
pub fn z_score(value: f64, mean: f64, sd: f64) -> f64 {
    (value - mean) / sd
}

pub fn is_anomaly(z_score: f64) -> bool {
    z_score.abs() > ANOMALY_Z_THRESHOLD
}

/// Raw score of one metric against its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricScore {
    /// Unrounded; used for the threshold test
    pub z_score: f64,
    pub is_anomaly: bool,
    /// Taken from the sign of `value - mean`, not from the z-score
    pub is_above_mean: bool,
}

impl MetricScore {
    pub fn new(value: f64, mean: f64, sd: f64) -> Self {
        let z = z_score(value, mean, sd);
        Self {
            z_score: z,
            is_anomaly: is_anomaly(z),
            is_above_mean: value > mean,
        }
    }

    /// Z-score rounded to one decimal for display
    pub fn display_z_score(&self) -> f64 {
        round_to(self.z_score, 1)
    }
}

/// Direction of a temperature departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempAnomaly {
    Hot,
    Cold,
}

impl TempAnomaly {
    pub fn from_score(score: &MetricScore) -> Self {
        if score.is_above_mean {
            Self::Hot
        } else {
            Self::Cold
        }
    }

    /// Badge text shown when the departure is anomalous
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Hot => "Unusually warm",
            Self::Cold => "Unusually cool",
        }
    }
}

/// Direction of a precipitation departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipAnomaly {
    Wet,
    Dry,
}

impl PrecipAnomaly {
    pub fn from_score(score: &MetricScore) -> Self {
        if score.is_above_mean {
            Self::Wet
        } else {
            Self::Dry
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::Wet => "Unusually wet",
            Self::Dry => "Unusually dry",
        }
    }
}

/// Direction of a UV index departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UvAnomaly {
    High,
    Low,
}

impl UvAnomaly {
    pub fn from_score(score: &MetricScore) -> Self {
        if score.is_above_mean {
            Self::High
        } else {
            Self::Low
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::High => "Unusually high UV",
            Self::Low => "Unusually low UV",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_anomaly(1.5));
        assert!(is_anomaly(1.51));
        assert!(!is_anomaly(-1.5));
        assert!(is_anomaly(-1.51));
        assert!(!is_anomaly(0.0));
    }

    #[test]
    fn test_z_score_exactly_on_threshold() {
        // (56 - 50) / 4 == 1.5
        let score = MetricScore::new(56.0, 50.0, 4.0);
        assert_eq!(score.z_score, 1.5);
        assert!(!score.is_anomaly);
        assert!(score.is_above_mean);
    }

    #[test]
    fn test_display_rounding_does_not_feed_threshold() {
        // 1.52 rounds to 1.5 for display but is still anomalous
        let score = MetricScore::new(57.6, 50.0, 5.0);
        assert!(score.is_anomaly);
        assert_eq!(score.display_z_score(), 1.5);
    }

    #[test]
    fn test_negative_z_score_display() {
        let score = MetricScore::new(40.0, 68.0, 12.0);
        assert_eq!(score.display_z_score(), -2.3);
        assert!(score.is_anomaly);
        assert!(!score.is_above_mean);
    }

    #[test]
    fn test_negative_half_z_score_rounds_up() {
        // (49 - 50) / 4 == -0.25
        let score = MetricScore::new(49.0, 50.0, 4.0);
        assert_eq!(score.display_z_score(), -0.2);
    }

    #[test]
    fn test_tie_with_mean_falls_to_lower_label() {
        let score = MetricScore::new(50.0, 50.0, 4.0);
        assert_eq!(TempAnomaly::from_score(&score), TempAnomaly::Cold);
        assert_eq!(PrecipAnomaly::from_score(&score), PrecipAnomaly::Dry);
        assert_eq!(UvAnomaly::from_score(&score), UvAnomaly::Low);
        assert_eq!(score.display_z_score(), 0.0);
    }

    #[test]
    fn test_direction_labels_above_mean() {
        let score = MetricScore::new(9.0, 5.0, 1.0);
        assert_eq!(TempAnomaly::from_score(&score), TempAnomaly::Hot);
        assert_eq!(PrecipAnomaly::from_score(&score), PrecipAnomaly::Wet);
        assert_eq!(UvAnomaly::from_score(&score), UvAnomaly::High);
    }

    #[test]
    fn test_labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&TempAnomaly::Hot).unwrap(), "\"hot\"");
        assert_eq!(serde_json::to_string(&PrecipAnomaly::Dry).unwrap(), "\"dry\"");
        assert_eq!(serde_json::to_string(&UvAnomaly::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_badges() {
        assert_eq!(TempAnomaly::Hot.badge(), "Unusually warm");
        assert_eq!(TempAnomaly::Cold.badge(), "Unusually cool");
        assert_eq!(PrecipAnomaly::Wet.badge(), "Unusually wet");
    }
}
