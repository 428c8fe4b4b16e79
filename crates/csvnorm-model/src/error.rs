use std::num::ParseIntError;

use thiserror::Error;

/// Row-scoped failure raised by a field normalizer.
///
/// The display text is what gets written to the error stream, one line per
/// skipped row, so every variant embeds the offending input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("Invalid ZIP code '{value}': {source}")]
    InvalidZip {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Duration is in an invalid format: {value}")]
    InvalidDurationFormat { value: String },

    #[error("Duration has an invalid value: {value}")]
    InvalidDurationValue { value: String },
}

/// Payload-free discriminant of [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    InvalidTimestamp,
    InvalidZip,
    InvalidDurationFormat,
    InvalidDurationValue,
}

impl ValidationError {
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }

    pub fn invalid_zip(value: impl Into<String>, source: ParseIntError) -> Self {
        Self::InvalidZip {
            value: value.into(),
            source,
        }
    }

    pub fn invalid_duration_format(value: impl Into<String>) -> Self {
        Self::InvalidDurationFormat {
            value: value.into(),
        }
    }

    pub fn invalid_duration_value(value: impl Into<String>) -> Self {
        Self::InvalidDurationValue {
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::InvalidTimestamp { .. } => ValidationErrorKind::InvalidTimestamp,
            Self::InvalidZip { .. } => ValidationErrorKind::InvalidZip,
            Self::InvalidDurationFormat { .. } => ValidationErrorKind::InvalidDurationFormat,
            Self::InvalidDurationValue { .. } => ValidationErrorKind::InvalidDurationValue,
        }
    }

    /// The raw field value that failed validation.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidTimestamp { value }
            | Self::InvalidZip { value, .. }
            | Self::InvalidDurationFormat { value }
            | Self::InvalidDurationValue { value } => value,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
