//! Data model shared by the CSV normalization crates.

pub mod error;
pub mod record;

pub use error::{Result, ValidationError, ValidationErrorKind};
pub use record::{NormalizedRecord, OUTPUT_HEADER};
