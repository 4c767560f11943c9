//! Most-similar historical year by normalized temperature/precipitation distance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::YearSample;

/// Typical temperature variation in degrees
pub const TYPICAL_TEMPERATURE_RANGE: f64 = 10.0;
/// Typical precipitation variation in percentage points
pub const TYPICAL_PRECIPITATION_RANGE: f64 = 30.0;

const VERY_HIGH_SIMILARITY: f64 = 0.1;
const HIGH_SIMILARITY: f64 = 0.2;
const MODERATE_SIMILARITY: f64 = 0.3;

/// Qualitative band for a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Similarity {
    #[serde(rename = "very high")]
    VeryHigh,
    High,
    Moderate,
    Low,
    Unknown,
}

impl Similarity {
    /// Band a distance score (lower is more similar)
    pub fn from_score(score: f64) -> Self {
        if score < VERY_HIGH_SIMILARITY {
            Self::VeryHigh
        } else if score < HIGH_SIMILARITY {
            Self::High
        } else if score < MODERATE_SIMILARITY {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryHigh => "very high",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closest historical year and how close it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarYear {
    pub year: Option<i32>,
    pub similarity: Similarity,
}

impl SimilarYear {
    pub fn unknown() -> Self {
        Self {
            year: None,
            similarity: Similarity::Unknown,
        }
    }

    /// Year-comparison text for display
    pub fn describe(&self) -> String {
        match self.year {
            Some(year) => format!("Similar to {} ({} similarity)", year, self.similarity),
            None => "No comparable year on record".to_string(),
        }
    }
}

/// Normalized Euclidean distance between the forecast and one sample
pub fn similarity_score(temp: f64, precip: f64, sample: &YearSample) -> f64 {
    let temp_diff = (temp - sample.temp) / TYPICAL_TEMPERATURE_RANGE;
    let precip_diff = (precip - sample.precip) / TYPICAL_PRECIPITATION_RANGE;
    (temp_diff * temp_diff + precip_diff * precip_diff).sqrt()
}

/// Find the historical year closest to the forecast temperature and
/// precipitation chance. Ties go to the earliest sample in `samples`.
pub fn find_similar_year(temp: f64, precip: f64, samples: &[YearSample]) -> SimilarYear {
    let mut best: Option<(&YearSample, f64)> = None;
    for sample in samples {
        let score = similarity_score(temp, precip, sample);
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((sample, score));
        }
    }

    let Some((sample, score)) = best else {
        tracing::debug!("No yearly samples, similar year unknown");
        return SimilarYear::unknown();
    };

    let similarity = Similarity::from_score(score);
    tracing::trace!(year = sample.year, score, %similarity, "similar year");
    SimilarYear {
        year: Some(sample.year),
        similarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(year: i32, temp: f64, precip: f64) -> YearSample {
        YearSample { year, temp, precip }
    }

    fn test_years() -> Vec<YearSample> {
        vec![
            sample(2018, 70.0, 20.0),
            sample(2019, 65.0, 40.0),
            sample(2020, 60.0, 60.0),
            sample(2021, 55.0, 80.0),
        ]
    }

    #[test]
    fn test_empty_data_is_unknown() {
        assert_eq!(find_similar_year(70.0, 20.0, &[]), SimilarYear::unknown());
        assert_eq!(SimilarYear::unknown().year, None);
        assert_eq!(SimilarYear::unknown().similarity, Similarity::Unknown);
    }

    #[test]
    fn test_exact_match() {
        let result = find_similar_year(70.0, 20.0, &test_years());
        assert_eq!(result.year, Some(2018));
        assert_eq!(result.similarity, Similarity::VeryHigh);
    }

    #[test]
    fn test_closest_match() {
        let result = find_similar_year(64.0, 42.0, &test_years());
        assert_eq!(result.year, Some(2019));
    }

    #[test]
    fn test_distant_forecast_is_low() {
        let result = find_similar_year(80.0, 90.0, &test_years());
        assert_eq!(result.similarity, Similarity::Low);
        assert_eq!(result.year, Some(2020));
    }

    #[test]
    fn test_precipitation_is_weighted_less_than_temperature() {
        // 3 degrees and 5 points from 2019, 2 degrees and 25 points from 2020
        let result = find_similar_year(62.0, 35.0, &test_years());
        assert_eq!(result.year, Some(2019));
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(Similarity::from_score(0.0), Similarity::VeryHigh);
        assert_eq!(Similarity::from_score(0.1), Similarity::High);
        assert_eq!(Similarity::from_score(0.15), Similarity::High);
        assert_eq!(Similarity::from_score(0.25), Similarity::Moderate);
        assert_eq!(Similarity::from_score(0.3), Similarity::Low);
    }

    #[test]
    fn test_high_and_moderate_matches() {
        // 1.5 degrees off 2018: score 0.15
        let high = find_similar_year(71.5, 20.0, &test_years());
        assert_eq!(high.similarity, Similarity::High);
        // 7.5 points off 2018: score 0.25
        let moderate = find_similar_year(70.0, 27.5, &test_years());
        assert_eq!(moderate.similarity, Similarity::Moderate);
    }

    #[test]
    fn test_ties_go_to_first_sample() {
        let years = vec![sample(2001, 50.0, 40.0), sample(2002, 50.0, 40.0)];
        assert_eq!(find_similar_year(52.0, 40.0, &years).year, Some(2001));

        let equidistant = vec![sample(2003, 48.0, 40.0), sample(2004, 52.0, 40.0)];
        assert_eq!(find_similar_year(50.0, 40.0, &equidistant).year, Some(2003));
    }

    #[test]
    fn test_similarity_serializes_with_space() {
        let json = serde_json::to_string(&Similarity::VeryHigh).unwrap();
        assert_eq!(json, "\"very high\"");
        let year = serde_json::to_value(SimilarYear::unknown()).unwrap();
        assert_eq!(year, serde_json::json!({"year": null, "similarity": "unknown"}));
    }

    #[test]
    fn test_describe() {
        let found = SimilarYear {
            year: Some(2018),
            similarity: Similarity::VeryHigh,
        };
        assert_eq!(found.describe(), "Similar to 2018 (very high similarity)");
        assert_eq!(SimilarYear::unknown().describe(), "No comparable year on record");
    }
}
