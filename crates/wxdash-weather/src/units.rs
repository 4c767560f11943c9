//! Temperature unit conversion.
//!
//! [`convert_temp`] infers the source unit from magnitude: a reading that is
//! already plausible for the target unit is returned unconverted. Upstream
//! callers hand over readings in either unit, so the inference is kept, but
//! it misreads values that are plausible in both units (40 is a mild
//! Fahrenheit day and a heat wave in Celsius). Prefer [`convert_between`]
//! whenever the source unit is known.

use crate::range::round_to;
use crate::types::TemperatureUnit;

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert a reading of unknown unit into `target`, rounded to a whole degree
/// (halves toward positive infinity).
///
/// Missing or non-finite readings yield 0.
pub fn convert_temp(value: Option<f64>, target: TemperatureUnit) -> f64 {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return 0.0;
    };

    if target.is_plausible(value) {
        return round_to(value, 0);
    }

    let converted = match target {
        TemperatureUnit::Celsius => fahrenheit_to_celsius(value),
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(value),
    };
    tracing::trace!(value, %target, converted, "inferred unit conversion");
    round_to(converted, 0)
}

/// Convert a reading whose unit is known, rounded to a whole degree.
///
/// Non-finite readings yield 0.
pub fn convert_between(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let converted = match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => celsius_to_fahrenheit(value),
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => fahrenheit_to_celsius(value),
        _ => value,
    };
    round_to(converted, 0)
}
