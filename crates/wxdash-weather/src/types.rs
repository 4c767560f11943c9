use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::percentile::synthesize_breakpoints;

/// Temperature unit for display and conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Short symbol used in labels ("F" / "C")
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }

    /// Open interval of readings that are taken to already be in this unit
    pub fn plausible_range(&self) -> (f64, f64) {
        match self {
            Self::Fahrenheit => (-50.0, 150.0),
            Self::Celsius => (-45.0, 65.0),
        }
    }

    pub fn is_plausible(&self, value: f64) -> bool {
        let (low, high) = self.plausible_range();
        value > low && value < high
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown temperature unit: {0} (expected F or C)")]
pub struct ParseUnitError(pub String);

impl FromStr for TemperatureUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "c" | "celsius" => Ok(Self::Celsius),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// One observed historical year for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSample {
    pub year: i32,
    pub temp: f64,
    pub precip: f64,
}

/// Historical baseline for one calendar day, aggregated across years.
///
/// Percentile arrays are optional. When absent, breakpoints are synthesized
/// from the mean and standard deviation (see [`synthesize_breakpoints`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDayStat {
    pub temp_mean: f64,
    #[serde(rename = "tempSD")]
    pub temp_sd: f64,
    pub precip_mean: f64,
    #[serde(rename = "precipSD")]
    pub precip_sd: f64,
    pub uv_mean: f64,
    #[serde(rename = "uvSD")]
    pub uv_sd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_percentiles: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_percentiles: Option<Vec<f64>>,
    #[serde(default)]
    pub yearly_data: Vec<YearSample>,
}

impl HistoricalDayStat {
    /// Baseline with no percentile arrays and no yearly samples
    pub fn from_moments(
        temp: (f64, f64),
        precip: (f64, f64),
        uv: (f64, f64),
    ) -> Self {
        Self {
            temp_mean: temp.0,
            temp_sd: temp.1,
            precip_mean: precip.0,
            precip_sd: precip.1,
            uv_mean: uv.0,
            uv_sd: uv.1,
            temp_percentiles: None,
            precip_percentiles: None,
            yearly_data: Vec::new(),
        }
    }

    /// Temperature breakpoints, supplied or synthesized
    pub fn temp_breakpoints(&self) -> Cow<'_, [f64]> {
        match &self.temp_percentiles {
            Some(values) => Cow::Borrowed(values.as_slice()),
            None => Cow::Owned(synthesize_breakpoints(self.temp_mean, self.temp_sd)),
        }
    }

    /// Precipitation breakpoints, supplied or synthesized
    pub fn precip_breakpoints(&self) -> Cow<'_, [f64]> {
        match &self.precip_percentiles {
            Some(values) => Cow::Borrowed(values.as_slice()),
            None => Cow::Owned(synthesize_breakpoints(self.precip_mean, self.precip_sd)),
        }
    }

    /// Check the record against the shape the engine assumes.
    ///
    /// The engine never calls this itself; it is meant for loaders that
    /// accept baselines from outside the process.
    ///
    /// # Errors
    ///
    /// Returns the first [`BaselineError`] found.
    pub fn validate(&self) -> Result<(), BaselineError> {
        let moments = [
            ("tempMean", self.temp_mean, "tempSD", self.temp_sd),
            ("precipMean", self.precip_mean, "precipSD", self.precip_sd),
            ("uvMean", self.uv_mean, "uvSD", self.uv_sd),
        ];
        for (mean_field, mean, sd_field, sd) in moments {
            if !mean.is_finite() {
                return Err(BaselineError::NonFinite { field: mean_field });
            }
            if !sd.is_finite() {
                return Err(BaselineError::NonFinite { field: sd_field });
            }
            if sd <= 0.0 {
                return Err(BaselineError::NonPositiveSd {
                    field: sd_field,
                    value: sd,
                });
            }
        }

        let percentiles = [
            ("tempPercentiles", &self.temp_percentiles),
            ("precipPercentiles", &self.precip_percentiles),
        ];
        for (field, values) in percentiles {
            let Some(values) = values else { continue };
            if values.iter().any(|v| !v.is_finite()) {
                return Err(BaselineError::NonFinite { field });
            }
            if values.windows(2).any(|pair| pair[0] > pair[1]) {
                return Err(BaselineError::UnsortedPercentiles { field });
            }
        }

        if self
            .yearly_data
            .iter()
            .any(|s| !s.temp.is_finite() || !s.precip.is_finite())
        {
            return Err(BaselineError::NonFinite {
                field: "yearlyData",
            });
        }

        Ok(())
    }
}

/// Headline values of a single forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub temp_high: f64,
    /// Chance of precipitation, 0-100
    pub precipitation_chance: f64,
    pub uv_index: f64,
}

impl ForecastDay {
    pub fn new(temp_high: f64, precipitation_chance: f64, uv_index: f64) -> Self {
        Self {
            temp_high,
            precipitation_chance,
            uv_index,
        }
    }
}

/// Baseline record errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BaselineError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveSd { field: &'static str, value: f64 },
    #[error("{field} must be sorted in ascending order")]
    UnsortedPercentiles { field: &'static str },
}

/// Comparison errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    #[error("Forecast has {forecast} days but {baselines} baselines were supplied")]
    LengthMismatch { forecast: usize, baselines: usize },
    #[error("Baseline for {day} is invalid: {source}")]
    InvalidBaseline {
        day: String,
        #[source]
        source: BaselineError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_ninth() -> HistoricalDayStat {
        HistoricalDayStat {
            temp_percentiles: Some(vec![42.0, 44.0, 46.0, 47.0, 49.0, 51.0, 54.0]),
            precip_percentiles: Some(vec![45.0, 55.0, 62.0, 68.0, 74.0, 80.0, 88.0]),
            yearly_data: vec![
                YearSample { year: 2005, temp: 45.0, precip: 72.0 },
                YearSample { year: 2010, temp: 46.0, precip: 65.0 },
            ],
            ..HistoricalDayStat::from_moments((47.0, 3.2), (68.0, 12.0), (3.2, 0.8))
        }
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("c".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!(
            "Celsius".parse::<TemperatureUnit>(),
            Ok(TemperatureUnit::Celsius)
        );
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn test_unit_plausible_range_is_exclusive() {
        assert!(TemperatureUnit::Fahrenheit.is_plausible(149.9));
        assert!(!TemperatureUnit::Fahrenheit.is_plausible(150.0));
        assert!(!TemperatureUnit::Celsius.is_plausible(-45.0));
        assert!(TemperatureUnit::Celsius.is_plausible(64.0));
    }

    #[test]
    fn test_deserialize_camel_case_baseline() {
        let json = r#"{
            "tempMean": 47, "tempSD": 3.2,
            "precipMean": 68, "precipSD": 12,
            "uvMean": 3.2, "uvSD": 0.8,
            "tempPercentiles": [42, 44, 46, 47, 49, 51, 54],
            "yearlyData": [{"year": 2005, "temp": 45, "precip": 72}]
        }"#;
        let stat: HistoricalDayStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.temp_sd, 3.2);
        assert!(stat.precip_percentiles.is_none());
        assert_eq!(stat.yearly_data.len(), 1);
        assert_eq!(stat.yearly_data[0].year, 2005);
    }

    #[test]
    fn test_yearly_data_defaults_to_empty() {
        let json = r#"{"tempMean": 50, "tempSD": 4, "precipMean": 30,
            "precipSD": 10, "uvMean": 5, "uvSD": 1}"#;
        let stat: HistoricalDayStat = serde_json::from_str(json).unwrap();
        assert!(stat.yearly_data.is_empty());
    }

    #[test]
    fn test_supplied_breakpoints_are_borrowed() {
        let stat = march_ninth();
        assert!(matches!(stat.temp_breakpoints(), Cow::Borrowed(_)));
        assert_eq!(stat.temp_breakpoints()[6], 54.0);
    }

    #[test]
    fn test_missing_breakpoints_are_synthesized() {
        let stat = HistoricalDayStat::from_moments((50.0, 4.0), (30.0, 10.0), (5.0, 1.0));
        assert_eq!(
            stat.temp_breakpoints().as_ref(),
            &[42.0, 46.0, 48.0, 50.0, 52.0, 54.0, 58.0]
        );
        assert_eq!(
            stat.precip_breakpoints().as_ref(),
            &[10.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0]
        );
    }

    #[test]
    fn test_validate_accepts_well_formed_baseline() {
        assert_eq!(march_ninth().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unsorted_percentiles() {
        let mut stat = march_ninth();
        stat.precip_percentiles = Some(vec![45.0, 40.0, 60.0]);
        assert_eq!(
            stat.validate(),
            Err(BaselineError::UnsortedPercentiles {
                field: "precipPercentiles"
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_sd() {
        let mut stat = march_ninth();
        stat.uv_sd = 0.0;
        assert!(matches!(
            stat.validate(),
            Err(BaselineError::NonPositiveSd { field: "uvSD", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_sample() {
        let mut stat = march_ninth();
        stat.yearly_data[1].temp = f64::NAN;
        assert_eq!(
            stat.validate(),
            Err(BaselineError::NonFinite {
                field: "yearlyData"
            })
        );
    }
}
