//! Tests for timestamp parsing and timezone normalization.

use availability_engine::timestamp::{parse_timestamp, parse_timezone};
use availability_engine::AvailabilityError;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

#[test]
fn rfc3339_keeps_its_own_offset() {
    let ts = parse_timestamp("2026-03-02T09:00:00+02:00", Tz::America__New_York).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap());

    let ts = parse_timestamp("2026-03-02T09:00:00Z", Tz::Asia__Tokyo).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
}

#[test]
fn naive_time_is_read_in_given_timezone() {
    let ts = parse_timestamp("2026-03-02T09:00:00", Tz::Europe__Helsinki).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap());

    // Seconds are optional.
    let ts = parse_timestamp("2026-03-02T09:00", Tz::UTC).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
}

#[test]
fn naive_time_follows_summer_offset() {
    // New York is on EDT (UTC-4) in July.
    let ts = parse_timestamp("2026-07-01T09:00:00", Tz::America__New_York).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 7, 1, 13, 0, 0).unwrap());
}

#[test]
fn time_in_spring_forward_gap_is_rejected() {
    // 2026-03-08 02:00 → 03:00 in New York.
    let err = parse_timestamp("2026-03-08T02:30:00", Tz::America__New_York).unwrap_err();
    assert_eq!(
        err,
        AvailabilityError::NonexistentLocalTime {
            local: "2026-03-08T02:30:00".to_string(),
            timezone: "America/New_York".to_string(),
        }
    );
}

#[test]
fn ambiguous_fall_back_time_resolves_to_earlier_instant() {
    // 2026-11-01 01:30 happens twice in New York; the first is EDT (UTC-4).
    let ts = parse_timestamp("2026-11-01T01:30:00", Tz::America__New_York).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

#[test]
fn garbage_timestamp_is_rejected() {
    let err = parse_timestamp("next tuesday", Tz::UTC).unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidTimestamp(_)));
}

#[test]
fn timezone_names_are_validated() {
    assert_eq!(parse_timezone("Europe/Helsinki").unwrap(), Tz::Europe__Helsinki);
    assert_eq!(
        parse_timezone("Mars/Olympus_Mons").unwrap_err(),
        AvailabilityError::InvalidTimezone("Mars/Olympus_Mons".to_string())
    );
}
