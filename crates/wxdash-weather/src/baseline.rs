//! Historical baselines keyed by calendar day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{CompareError, HistoricalDayStat};

/// Leap year used to check month/day pairs, so Feb 29 is accepted
const REFERENCE_LEAP_YEAR: i32 = 2000;

/// Year-independent month/day pair, written "MM-DD"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDay {
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarDayError {
    #[error("Expected MM-DD, got {0:?}")]
    Format(String),
    #[error("No such calendar day: {month:02}-{day:02}")]
    OutOfRange { month: u32, day: u32 },
}

impl CalendarDay {
    /// # Errors
    ///
    /// Returns [`CalendarDayError::OutOfRange`] when the pair never occurs.
    pub fn new(month: u32, day: u32) -> Result<Self, CalendarDayError> {
        NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, day)
            .map(|_| Self { month, day })
            .ok_or(CalendarDayError::OutOfRange { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for CalendarDay {
    type Err = CalendarDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || CalendarDayError::Format(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(format_error)?;
        let month = month.parse().map_err(|_| format_error())?;
        let day = day.parse().map_err(|_| format_error())?;
        Self::new(month, day)
    }
}

impl TryFrom<String> for CalendarDay {
    type Error = CalendarDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDay> for String {
    fn from(day: CalendarDay) -> Self {
        day.to_string()
    }
}

/// Baselines by calendar day, with a fallback record for days that have
/// no exact entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    default: HistoricalDayStat,
    days: BTreeMap<CalendarDay, HistoricalDayStat>,
}

impl BaselineTable {
    pub fn new(default: HistoricalDayStat) -> Self {
        Self {
            default,
            days: BTreeMap::new(),
        }
    }

    pub fn with_days(
        default: HistoricalDayStat,
        days: impl IntoIterator<Item = (CalendarDay, HistoricalDayStat)>,
    ) -> Self {
        Self {
            default,
            days: days.into_iter().collect(),
        }
    }

    /// Add or replace the baseline for `day`, returning the previous one
    pub fn insert(&mut self, day: CalendarDay, stat: HistoricalDayStat) -> Option<HistoricalDayStat> {
        self.days.insert(day, stat)
    }

    pub fn get(&self, day: CalendarDay) -> Option<&HistoricalDayStat> {
        self.days.get(&day)
    }

    pub fn default_baseline(&self) -> &HistoricalDayStat {
        &self.default
    }

    /// Baseline for the calendar day of `date`, or the default record
    pub fn lookup(&self, date: NaiveDate) -> &HistoricalDayStat {
        let day = CalendarDay::from_date(date);
        match self.days.get(&day) {
            Some(stat) => stat,
            None => {
                tracing::debug!(%day, "No baseline for calendar day, using default");
                &self.default
            }
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Validate the default and every dated baseline.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidBaseline`] naming the first bad record.
    pub fn validate(&self) -> Result<(), CompareError> {
        self.default
            .validate()
            .map_err(|source| CompareError::InvalidBaseline {
                day: "default".to_string(),
                source,
            })?;

        for (day, stat) in &self.days {
            stat.validate()
                .map_err(|source| CompareError::InvalidBaseline {
                    day: day.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaselineError;

    fn stat(temp_mean: f64) -> HistoricalDayStat {
        HistoricalDayStat::from_moments((temp_mean, 3.0), (60.0, 12.0), (3.5, 0.8))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_day_parse_and_display() {
        let day: CalendarDay = "03-09".parse().unwrap();
        assert_eq!(day.month(), 3);
        assert_eq!(day.day(), 9);
        assert_eq!(day.to_string(), "03-09");
        assert_eq!("3-9".parse::<CalendarDay>().unwrap(), day);
    }

    #[test]
    fn test_calendar_day_accepts_leap_day() {
        assert!(CalendarDay::new(2, 29).is_ok());
    }

    #[test]
    fn test_calendar_day_rejects_bad_input() {
        assert_eq!(
            CalendarDay::new(2, 30),
            Err(CalendarDayError::OutOfRange { month: 2, day: 30 })
        );
        assert!(matches!(
            "March 9".parse::<CalendarDay>(),
            Err(CalendarDayError::Format(_))
        ));
        assert!(matches!(
            "13-01".parse::<CalendarDay>(),
            Err(CalendarDayError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_calendar_day_as_json_map_key() {
        let mut map = BTreeMap::new();
        map.insert(CalendarDay::new(3, 9).unwrap(), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"03-09":1}"#);
        let back: BTreeMap<CalendarDay, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_lookup_exact_match_ignores_year() {
        let mut table = BaselineTable::new(stat(50.0));
        table.insert(CalendarDay::new(3, 9).unwrap(), stat(47.0));
        assert_eq!(table.lookup(date(2026, 3, 9)).temp_mean, 47.0);
        assert_eq!(table.lookup(date(1999, 3, 9)).temp_mean, 47.0);
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        let table = BaselineTable::with_days(
            stat(50.0),
            [(CalendarDay::new(3, 9).unwrap(), stat(47.0))],
        );
        assert_eq!(table.lookup(date(2026, 3, 10)).temp_mean, 50.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = BaselineTable::new(stat(50.0));
        let day = CalendarDay::new(7, 4).unwrap();
        assert!(table.insert(day, stat(80.0)).is_none());
        let previous = table.insert(day, stat(82.0));
        assert_eq!(previous.map(|s| s.temp_mean), Some(80.0));
        assert_eq!(table.get(day).map(|s| s.temp_mean), Some(82.0));
    }

    #[test]
    fn test_validate_names_offending_day() {
        let mut bad = stat(47.0);
        bad.temp_sd = -1.0;
        let table = BaselineTable::with_days(stat(50.0), [(CalendarDay::new(3, 9).unwrap(), bad)]);
        let err = table.validate().unwrap_err();
        assert_eq!(
            err,
            CompareError::InvalidBaseline {
                day: "03-09".to_string(),
                source: BaselineError::NonPositiveSd {
                    field: "tempSD",
                    value: -1.0
                },
            }
        );
        assert!(err.to_string().contains("03-09"));
    }

    #[test]
    fn test_validate_checks_default() {
        let mut bad = stat(50.0);
        bad.precip_percentiles = Some(vec![3.0, 1.0]);
        let table = BaselineTable::new(bad);
        assert!(matches!(
            table.validate(),
            Err(CompareError::InvalidBaseline { ref day, .. }) if day == "default"
        ));
    }
}
