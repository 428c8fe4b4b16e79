//! ZIP code validation and zero-filling.

use csvnorm_model::{Result, ValidationError};

/// Minimum width of a normalized ZIP code.
pub const ZIP_WIDTH: usize = 5;

/// Validate a ZIP code as an integer literal and zero-fill it to
/// [`ZIP_WIDTH`] characters.
///
/// The original text is kept as-is apart from the padding: values longer
/// than five characters are not truncated, and a leading sign stays in front
/// of the inserted zeros. Surrounding whitespace is tolerated by the integer
/// check but still counts toward the width.
pub fn normalize_zip(value: &str) -> Result<String> {
    value
        .trim()
        .parse::<i128>()
        .map_err(|source| ValidationError::invalid_zip(value, source))?;
    Ok(zero_fill(value, ZIP_WIDTH))
}

fn zero_fill(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let zeros = "0".repeat(width - len);
    if value.starts_with(['+', '-']) {
        let (sign, digits) = value.split_at(1);
        format!("{sign}{zeros}{digits}")
    } else {
        format!("{zeros}{value}")
    }
}
