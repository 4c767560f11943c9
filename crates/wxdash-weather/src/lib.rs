//! Historical comparison engine for wxdash
//!
//! Compares forecast days with per-calendar-day historical baselines:
//! z-scores and anomaly flags, percentile ranks, the most similar
//! historical year, and display bands. Everything here is pure and
//! synchronous.

pub mod types;
pub mod anomaly;
pub mod baseline;
pub mod compare;
pub mod percentile;
pub mod range;
pub mod similarity;
pub mod trend;
pub mod units;

pub use types::*;
pub use anomaly::{MetricScore, PrecipAnomaly, TempAnomaly, UvAnomaly, ANOMALY_Z_THRESHOLD};
pub use baseline::{BaselineTable, CalendarDay, CalendarDayError};
pub use compare::{compare_day, compare_forecast, Anomalies, ComparisonResult, ComparisonStats};
pub use percentile::{percentile_rank, synthesize_breakpoints};
pub use range::ValueRange;
pub use similarity::{find_similar_year, SimilarYear, Similarity};
pub use trend::{TrendDirection, TrendIndicator};
pub use units::{convert_between, convert_temp};
