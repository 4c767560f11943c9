//! Per-decade trend badges.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    /// CSS color class used for the badge
    pub fn color(&self) -> &'static str {
        match self {
            Self::Up => "text-red-500",
            Self::Down => "text-blue-500",
            Self::Neutral => "text-gray-500",
        }
    }
}

/// Direction, signed label and color for a trend value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendIndicator {
    pub direction: TrendDirection,
    pub value: String,
    pub color: &'static str,
}

impl TrendIndicator {
    /// Build an indicator for `value` with `unit` appended (e.g. "°F", "%").
    /// Zero and NaN read as "No change".
    pub fn new(value: f64, unit: &str) -> Self {
        let (direction, text) = if value > 0.0 {
            (TrendDirection::Up, format!("+{value}{unit}"))
        } else if value < 0.0 {
            (TrendDirection::Down, format!("{value}{unit}"))
        } else {
            (TrendDirection::Neutral, "No change".to_string())
        };

        Self {
            direction,
            value: text,
            color: direction.color(),
        }
    }

    /// Build an indicator from text; unparseable input is neutral.
    pub fn parse(raw: &str, unit: &str) -> Self {
        let value = raw.trim().parse::<f64>().unwrap_or(0.0);
        Self::new(value, unit)
    }
}
