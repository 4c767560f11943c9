//! Comparison of forecast days against their historical baselines.

use serde::{Deserialize, Serialize};

use crate::anomaly::{MetricScore, PrecipAnomaly, TempAnomaly, UvAnomaly};
use crate::percentile::percentile_rank;
use crate::range::ValueRange;
use crate::similarity::{find_similar_year, SimilarYear};
use crate::types::{CompareError, ForecastDay, HistoricalDayStat};

/// Display-precision statistics for one forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    pub temp_z_score: f64,
    pub precip_z_score: f64,
    pub uv_z_score: f64,
    pub temp_percentile: u8,
    pub precip_percentile: u8,
    pub similar_year: SimilarYear,
}

/// Anomaly flags and direction of each metric's departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomalies {
    pub temp: bool,
    pub precip: bool,
    pub uv: bool,
    pub temp_type: TempAnomaly,
    pub precip_type: PrecipAnomaly,
    pub uv_type: UvAnomaly,
}

impl Anomalies {
    pub fn any(&self) -> bool {
        self.temp || self.precip || self.uv
    }

    /// Badge text for each flagged metric, temperature first
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.temp {
            badges.push(self.temp_type.badge());
        }
        if self.precip {
            badges.push(self.precip_type.badge());
        }
        if self.uv {
            badges.push(self.uv_type.badge());
        }
        badges
    }
}

/// Result of comparing one forecast day with its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub temp_range: ValueRange,
    pub precip_range: ValueRange,
    pub uv_range: ValueRange,
    pub stats: ComparisonStats,
    pub anomalies: Anomalies,
}

/// Compare a forecast day with the baseline for its calendar day.
pub fn compare_day(forecast: &ForecastDay, baseline: &HistoricalDayStat) -> ComparisonResult {
    let temp = MetricScore::new(forecast.temp_high, baseline.temp_mean, baseline.temp_sd);
    let precip = MetricScore::new(
        forecast.precipitation_chance,
        baseline.precip_mean,
        baseline.precip_sd,
    );
    let uv = MetricScore::new(forecast.uv_index, baseline.uv_mean, baseline.uv_sd);

    let stats = ComparisonStats {
        temp_z_score: temp.display_z_score(),
        precip_z_score: precip.display_z_score(),
        uv_z_score: uv.display_z_score(),
        temp_percentile: percentile_rank(forecast.temp_high, &baseline.temp_breakpoints()),
        precip_percentile: percentile_rank(
            forecast.precipitation_chance,
            &baseline.precip_breakpoints(),
        ),
        similar_year: find_similar_year(
            forecast.temp_high,
            forecast.precipitation_chance,
            &baseline.yearly_data,
        ),
    };

    let anomalies = Anomalies {
        temp: temp.is_anomaly,
        precip: precip.is_anomaly,
        uv: uv.is_anomaly,
        temp_type: TempAnomaly::from_score(&temp),
        precip_type: PrecipAnomaly::from_score(&precip),
        uv_type: UvAnomaly::from_score(&uv),
    };

    tracing::debug!(
        temp_z = temp.z_score,
        precip_z = precip.z_score,
        uv_z = uv.z_score,
        anomalous = anomalies.any(),
        "Compared forecast day"
    );

    ComparisonResult {
        temp_range: ValueRange::temperature(baseline.temp_mean, baseline.temp_sd),
        precip_range: ValueRange::precipitation(baseline.precip_mean, baseline.precip_sd),
        uv_range: ValueRange::uv(baseline.uv_mean, baseline.uv_sd),
        stats,
        anomalies,
    }
}

/// Compare forecast days with baselines paired by position.
///
/// # Errors
///
/// Returns [`CompareError::LengthMismatch`] if the slices differ in length.
pub fn compare_forecast(
    days: &[ForecastDay],
    baselines: &[HistoricalDayStat],
) -> Result<Vec<ComparisonResult>, CompareError> {
    if days.len() != baselines.len() {
        return Err(CompareError::LengthMismatch {
            forecast: days.len(),
            baselines: baselines.len(),
        });
    }

    Ok(days
        .iter()
        .zip(baselines)
        .map(|(day, baseline)| compare_day(day, baseline))
        .collect())
}
