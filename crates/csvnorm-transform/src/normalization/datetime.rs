//! Permissive timestamp parsing.
//!
//! Input timestamps arrive in whatever shape the upstream export produced,
//! most commonly US style (`4/1/11 11:00:00 AM`). Parsing is delegated to
//! `dtparse`, which resolves ambiguous day/month ordering month-first and
//! pivots two-digit years into the century closest to today.

use chrono::{Datelike, NaiveDateTime, Timelike};
use csvnorm_model::{Result, ValidationError};
use tracing::trace;

/// Widest digit run the parser is given; `YYYYMMDDhhmmss` is the longest
/// compact form.
const MAX_DIGIT_RUN: usize = 14;

/// Widest digit run accepted as a clock component.
const MAX_CLOCK_DIGITS: usize = 9;

/// Parse free-form date/time text into a naive wall-clock date-time.
///
/// Any zone designator present in the text is discarded; callers attach the
/// source zone themselves (see [`ZoneConversion`](super::ZoneConversion)).
///
/// Text that names an impossible date or clock reading is rejected rather
/// than coerced: a day past the end of its month, or an hour above 12
/// alongside an AM/PM marker.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let runs = digit_runs(value);
    if let Some(run) = runs.iter().find(|run| run.is_oversized()) {
        trace!(digits = run.digits.len(), "timestamp has an oversized number");
        return Err(ValidationError::invalid_timestamp(value));
    }

    let parsed = match dtparse::parse(value) {
        Ok((parsed, _offset)) => parsed,
        Err(error) => {
            trace!(?error, "timestamp rejected by parser");
            return Err(ValidationError::invalid_timestamp(value));
        }
    };

    if has_meridiem(value) && clock_hour(&runs).is_some_and(|hour| hour > 12) {
        trace!(hour = parsed.hour(), "hour out of range for a 12-hour clock");
        return Err(ValidationError::invalid_timestamp(value));
    }
    if day_was_clamped(&parsed, &runs) {
        trace!(date = %parsed.date(), "day out of range for month");
        return Err(ValidationError::invalid_timestamp(value));
    }
    Ok(parsed)
}

/// A run of ASCII digits in the input text.
#[derive(Debug)]
struct DigitRun<'a> {
    digits: &'a str,
    /// Part of an `HH:MM[:SS[.fff]]` group.
    clock: bool,
    /// Directly followed by `:` and not preceded by one.
    leads_clock: bool,
}

impl DigitRun<'_> {
    fn is_oversized(&self) -> bool {
        let limit = if self.clock {
            MAX_CLOCK_DIGITS
        } else {
            MAX_DIGIT_RUN
        };
        self.digits.len() > limit
    }
}

fn digit_runs(value: &str) -> Vec<DigitRun<'_>> {
    let bytes = value.as_bytes();
    let mut runs: Vec<DigitRun<'_>> = Vec::new();
    let mut previous: Option<(usize, bool)> = None;
    let mut index = 0;
    while index < bytes.len() {
        if !bytes[index].is_ascii_digit() {
            index += 1;
            continue;
        }
        let start = index;
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            index += 1;
        }
        let before = start.checked_sub(1).map(|at| bytes[at]);
        let after = bytes.get(index).copied();
        let fraction = before == Some(b'.')
            && previous.is_some_and(|(end, clock)| clock && end + 1 == start);
        let clock = before == Some(b':') || after == Some(b':') || fraction;
        runs.push(DigitRun {
            digits: &value[start..index],
            clock,
            leads_clock: after == Some(b':') && before != Some(b':'),
        });
        previous = Some((index, clock));
    }
    runs
}

fn has_meridiem(value: &str) -> bool {
    value
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|word| ["am", "pm", "a", "p"].contains(&word.to_ascii_lowercase().as_str()))
}

fn clock_hour(runs: &[DigitRun<'_>]) -> Option<u32> {
    runs.iter()
        .find(|run| run.leads_clock)
        .and_then(|run| run.digits.parse().ok())
}

/// Whether the parser pulled an out-of-range day back to the month's end.
///
/// Only a month's last day can be the product of that, so any other date is
/// accepted as-is. Otherwise the day must be among the numbers the text
/// spells out once the month and year have been accounted for.
fn day_was_clamped(parsed: &NaiveDateTime, runs: &[DigitRun<'_>]) -> bool {
    let date = parsed.date();
    if date.succ_opt().is_some_and(|next| next.month() == date.month()) {
        return false;
    }

    let mut numbers: Vec<u32> = runs
        .iter()
        .filter(|run| !run.clock)
        .flat_map(|run| date_fields(run.digits))
        .collect();
    remove_one(&mut numbers, date.month());
    let year = date.year().unsigned_abs();
    if !remove_one(&mut numbers, year) {
        remove_one(&mut numbers, year % 100);
    }
    !numbers.is_empty() && !numbers.contains(&date.day())
}

/// Numbers a date token stands for, splitting compact `YYMMDD` and
/// `YYYYMMDD[hhmm[ss]]` forms into their parts.
fn date_fields(digits: &str) -> Vec<u32> {
    let widths: &[usize] = match digits.len() {
        6 => &[2, 2, 2],
        8 | 12 | 14 => &[4, 2, 2],
        _ => &[digits.len()],
    };
    let mut fields = Vec::with_capacity(widths.len());
    let mut rest = digits;
    for &width in widths {
        let (field, tail) = rest.split_at(width);
        if let Ok(number) = field.parse() {
            fields.push(number);
        }
        rest = tail;
    }
    fields
}

fn remove_one(numbers: &mut Vec<u32>, wanted: u32) -> bool {
    match numbers.iter().position(|&number| number == wanted) {
        Some(at) => {
            numbers.swap_remove(at);
            true
        }
        None => false,
    }
}
