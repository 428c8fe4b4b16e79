//! Wall-clock reinterpretation between IANA zones.
//!
//! A naive timestamp is read as local time in the source zone, resolved to
//! an instant using that zone's transition history, and then rendered in the
//! target zone. Offsets are never hardcoded: the Pacific/Eastern delta is
//! three hours most of the year but not on the days either zone changes.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;

/// ISO 8601 with a `±HH:MM` offset and whole seconds.
const ISO8601_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// Same as [`ISO8601_SECONDS`] with microseconds.
const ISO8601_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Source and target zones for timestamp conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneConversion {
    pub source: Tz,
    pub target: Tz,
}

impl Default for ZoneConversion {
    fn default() -> Self {
        Self {
            source: chrono_tz::US::Pacific,
            target: chrono_tz::US::Eastern,
        }
    }
}

impl ZoneConversion {
    pub fn new(source: Tz, target: Tz) -> Self {
        Self { source, target }
    }

    /// Resolve `naive` as wall-clock time in the source zone and express the
    /// same instant in the target zone.
    ///
    /// Repeated wall-clock times (the fall-back hour) resolve to the earlier
    /// instant. Skipped wall-clock times (the spring-forward gap) are read
    /// with the offset in force after the transition.
    pub fn convert(&self, naive: &NaiveDateTime) -> DateTime<Tz> {
        let local = match self.source.from_local_datetime(naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => self.resolve_gap(naive),
        };
        local.with_timezone(&self.target)
    }

    /// Convert and format as an ISO 8601 timestamp with numeric offset.
    ///
    /// Microseconds are only rendered when non-zero.
    pub fn to_timestamp(&self, naive: &NaiveDateTime) -> String {
        let converted = self.convert(naive);
        let format = if converted.nanosecond() / 1_000 == 0 {
            ISO8601_SECONDS
        } else {
            ISO8601_MICROS
        };
        converted.format(format).to_string()
    }

    fn resolve_gap(&self, naive: &NaiveDateTime) -> DateTime<Tz> {
        // Zones never transition twice within a day, so the offset a day
        // earlier is the one in force before the gap.
        let before = self
            .source
            .offset_from_utc_datetime(&(*naive - TimeDelta::days(1)))
            .fix();
        let probe = *naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
        let after = self.source.offset_from_utc_datetime(&probe).fix();
        let utc = *naive - TimeDelta::seconds(i64::from(after.local_minus_utc()));
        self.source.from_utc_datetime(&utc)
    }
}

/// Convert a US/Pacific wall-clock time to a US/Eastern ISO 8601 timestamp.
pub fn convert_pacific_to_eastern_timestamp(naive: &NaiveDateTime) -> String {
    ZoneConversion::default().to_timestamp(naive)
}
