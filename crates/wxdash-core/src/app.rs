use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use wxdash_weather::{
    compare_day, convert_between, convert_temp, Anomalies, BaselineTable, CalendarDay,
    ComparisonResult, ComparisonStats, ForecastDay, HistoricalDayStat, TemperatureUnit,
    ValueRange,
};

use crate::error::{AppError, InputError};
use crate::Config;

/// A forecast day with the date used to look up its baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatedForecast {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub forecast: ForecastDay,
}

/// Forecast days plus the baselines to compare them against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    /// Used for any day without an exact calendar-day entry
    pub default_baseline: HistoricalDayStat,
    #[serde(default)]
    pub baselines: BTreeMap<CalendarDay, HistoricalDayStat>,
    pub days: Vec<DatedForecast>,
}

impl ComparisonRequest {
    /// # Errors
    ///
    /// Returns [`InputError::Parse`] if `json` is not a valid request.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request file
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Read`] or [`InputError::Parse`].
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let json = std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn baseline_table(&self) -> BaselineTable {
        BaselineTable::with_days(
            self.default_baseline.clone(),
            self.baselines.iter().map(|(day, stat)| (*day, stat.clone())),
        )
    }
}

/// Historical display bands for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalRanges {
    pub temp: ValueRange,
    pub precip: ValueRange,
    pub uv: ValueRange,
}

/// Comparison output for one dated forecast day, with display text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayComparison {
    pub date: NaiveDate,
    pub stats: ComparisonStats,
    pub anomalies: Anomalies,
    /// Absent when `display.show_historical_range` is off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HistoricalRanges>,
    pub badges: Vec<&'static str>,
    pub similar_year_text: String,
}

impl DayComparison {
    fn new(date: NaiveDate, result: ComparisonResult, show_ranges: bool) -> Self {
        let ranges = show_ranges.then_some(HistoricalRanges {
            temp: result.temp_range,
            precip: result.precip_range,
            uv: result.uv_range,
        });
        Self {
            date,
            badges: result.anomalies.badges(),
            similar_year_text: result.stats.similar_year.describe(),
            stats: result.stats,
            anomalies: result.anomalies,
            ranges,
        }
    }
}

/// Main application state
pub struct App {
    config: Config,
}

impl App {
    /// Create an application from the validated configuration at `config_path`,
    /// or the default location when `None`
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot be loaded or is invalid.
    pub fn new(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let (config, _) = Config::load_validated(config_path)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        tracing::debug!("Display unit: {}", config.display.temperature_unit);
        Self { config }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compare every day in `request` against the baseline for its calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Compare`] if any baseline fails validation. No
    /// partial results are returned.
    pub fn compare(&self, request: &ComparisonRequest) -> Result<Vec<DayComparison>, AppError> {
        let table = request.baseline_table();
        table.validate()?;

        tracing::info!(
            "Comparing {} forecast days against {} baselines",
            request.days.len(),
            table.len()
        );

        let show_ranges = self.config.display.show_historical_range;
        let comparisons = request
            .days
            .iter()
            .map(|day| {
                let result = compare_day(&day.forecast, table.lookup(day.date));
                DayComparison::new(day.date, result, show_ranges)
            })
            .collect::<Vec<_>>();

        let anomalous = comparisons
            .iter()
            .filter(|c| c.anomalies.any())
            .count();
        tracing::info!("{} of {} days are anomalous", anomalous, comparisons.len());

        Ok(comparisons)
    }

    /// Convert a temperature into `to` (or the configured display unit).
    /// With `from` the conversion is explicit; without it the source unit
    /// is inferred from magnitude.
    pub fn convert(
        &self,
        value: f64,
        from: Option<TemperatureUnit>,
        to: Option<TemperatureUnit>,
    ) -> f64 {
        let target = to.unwrap_or(self.config.display.temperature_unit);
        match from {
            Some(source) => convert_between(value, source, target),
            None => convert_temp(Some(value), target),
        }
    }
}
