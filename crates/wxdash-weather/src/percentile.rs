//! Percentile rank against evenly spaced historical breakpoints.

/// Rank reported when there is no historical distribution to compare against
pub const NEUTRAL_PERCENTILE: u8 = 50;

/// SD multiples used when a baseline carries no percentile array
pub const SYNTHETIC_SD_MULTIPLES: [f64; 7] = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0];

/// Build breakpoints from mean and standard deviation.
pub fn synthesize_breakpoints(mean: f64, sd: f64) -> Vec<f64> {
    SYNTHETIC_SD_MULTIPLES
        .iter()
        .map(|multiple| mean + multiple * sd)
        .collect()
}

/// Estimate where `value` falls within a historical distribution.
///
/// `breakpoints` must be sorted ascending and are taken to sit at evenly
/// spaced percentiles: N breakpoints split 0..=100 into N-1 equal steps.
/// The rank inside a bracket is linearly interpolated.
///
/// - empty breakpoints: 50
/// - below the first breakpoint: 0
/// - above the last breakpoint: 100
/// - a single breakpoint: 0 below it, 100 at or above it
pub fn percentile_rank(value: f64, breakpoints: &[f64]) -> u8 {
    let (Some(&first), Some(&last)) = (breakpoints.first(), breakpoints.last()) else {
        return NEUTRAL_PERCENTILE;
    };

    // NaN orders against nothing; report it as the bottom of the distribution.
    if value.is_nan() || value < first {
        return 0;
    }
    if value > last || breakpoints.len() == 1 {
        return 100;
    }

    let step = 100.0 / (breakpoints.len() - 1) as f64;

    // First breakpoint >= value; the bracket starts one below it.
    let upper = breakpoints.partition_point(|&b| b < value).max(1);
    let lower = upper - 1;
    let (low, high) = (breakpoints[lower], breakpoints[upper]);

    let base = lower as f64 * step;
    let width = high - low;
    let rank = if width > 0.0 {
        base + (value - low) / width * step
    } else {
        base
    };

    tracing::trace!(value, bracket = lower, rank, "percentile rank");
    rank.round().clamp(0.0, 100.0) as u8
}
