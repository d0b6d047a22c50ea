//! Timestamp and timezone normalization for callers.
//!
//! Calendar providers and users hand over a mix of offset-qualified and
//! wall-clock timestamps. Everything is converted to a UTC instant before it
//! reaches the calculator.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AvailabilityError, Result};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an IANA timezone name (e.g., "Europe/Helsinki").
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
}

/// Parse a timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (e.g., "2026-02-17T14:00:00+02:00"), which keeps its own
/// offset, and naive local time ("2026-02-17T14:00:00" or "2026-02-17T14:00"),
/// which is interpreted as wall-clock time in `tz`.
///
/// During a DST fall-back an ambiguous wall-clock time resolves to the earlier
/// instant.
///
/// # Errors
/// `InvalidTimestamp` if the string matches no accepted format;
/// `NonexistentLocalTime` if the wall-clock time falls in a DST gap.
pub fn parse_timestamp(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AvailabilityError::InvalidTimestamp(s.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(AvailabilityError::NonexistentLocalTime {
            local: s.to_string(),
            timezone: tz.name().to_string(),
        }),
    }
}
