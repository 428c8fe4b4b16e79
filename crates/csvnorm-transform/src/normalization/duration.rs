//! Compact `H:MM:SS.fff` durations.

use csvnorm_model::{Result, ValidationError};

/// Decimal places kept when rendering or summing seconds.
const SECONDS_PRECISION: usize = 3;

/// Convert a compact `H:MM:SS.fff` duration into seconds.
///
/// Components are not range checked: `111:23:32.123` is a valid duration.
pub fn parse_compact_duration(value: &str) -> Result<f64> {
    let parts: Vec<&str> = value.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(ValidationError::invalid_duration_format(value));
    };

    let hours = parse_component(hours, value)?;
    let minutes = parse_component(minutes, value)?;
    let seconds = parse_component(seconds, value)?;

    Ok((hours * 3600.0) + (minutes * 60.0) + seconds)
}

fn parse_component(component: &str, original: &str) -> Result<f64> {
    component
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::invalid_duration_value(original))
}

/// Sum two durations, rounding to millisecond precision to drop binary
/// floating-point noise.
pub fn sum_durations(first: f64, second: f64) -> f64 {
    let total = first + second;
    format_seconds(total).parse::<f64>().unwrap_or(total)
}

/// Render seconds with a fixed three decimal places.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.prec$}", prec = SECONDS_PRECISION)
}
