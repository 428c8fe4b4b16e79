//! Field normalization for CSV rows.
//!
//! This crate provides the per-field parsers used by the row pipeline:
//!
//! - **datetime**: permissive timestamp parsing into naive date-times
//! - **timezone**: wall-clock reinterpretation between IANA zones
//! - **zip**: ZIP code validation and zero-filling
//! - **duration**: compact `H:MM:SS.fff` durations and their sums
//! - **text**: name casing

pub mod normalization;

pub use normalization::{
    ZoneConversion, format_seconds, normalize_zip, parse_compact_duration, parse_timestamp,
    sum_durations, upper_case_name,
};
