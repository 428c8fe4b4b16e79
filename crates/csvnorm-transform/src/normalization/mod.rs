//! Normalization functions for individual CSV fields.
//!
//! Every function here is pure: it either returns the normalized value or a
//! [`ValidationError`](csvnorm_model::ValidationError) carrying the raw input.

pub mod datetime;
pub mod duration;
pub mod text;
pub mod timezone;
pub mod zip;

pub use datetime::parse_timestamp;
pub use duration::{format_seconds, parse_compact_duration, sum_durations};
pub use text::upper_case_name;
pub use timezone::{ZoneConversion, convert_pacific_to_eastern_timestamp};
pub use zip::{ZIP_WIDTH, normalize_zip};
