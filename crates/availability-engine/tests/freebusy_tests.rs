//! Tests for free/busy slot computation.

use availability_engine::freebusy::{compute_free_slots, find_first_free_slot, normalize_busy};
use availability_engine::{AvailabilityError, BusyInterval, FreeInterval, TimeWindow};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Helper: an instant on 2026-03-02 at the given wall-clock time (UTC).
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

fn busy(start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
    }
}

fn free(start: (u32, u32), end: (u32, u32)) -> FreeInterval {
    FreeInterval {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
    }
}

fn workday() -> TimeWindow {
    TimeWindow::new(at(9, 0), at(17, 0)).unwrap()
}

// ── Reference scenarios ─────────────────────────────────────────────────────

#[test]
fn two_meetings_leave_three_gaps() {
    let slots = compute_free_slots(
        &workday(),
        &[busy((10, 0), (10, 30)), busy((13, 0), (14, 0))],
    )
    .unwrap();

    assert_eq!(
        slots,
        vec![
            free((9, 0), (10, 0)),
            free((10, 30), (13, 0)),
            free((14, 0), (17, 0)),
        ]
    );
}

#[test]
fn busy_overlapping_window_start_is_clipped() {
    let slots = compute_free_slots(&workday(), &[busy((8, 0), (9, 30))]).unwrap();
    assert_eq!(slots, vec![free((9, 30), (17, 0))]);
}

#[test]
fn fully_booked_window_has_no_free_slots() {
    let slots = compute_free_slots(&workday(), &[busy((9, 0), (17, 0))]).unwrap();
    assert!(slots.is_empty(), "fully booked window should be empty");
}

#[test]
fn no_busy_intervals_entire_window_is_free() {
    let slots = compute_free_slots(&workday(), &[]).unwrap();
    assert_eq!(slots, vec![free((9, 0), (17, 0))]);
    assert_eq!(slots[0].duration_minutes(), 480);
}

// ── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn back_to_back_busy_emits_no_zero_length_gap() {
    let slots = compute_free_slots(
        &workday(),
        &[busy((10, 0), (11, 0)), busy((11, 0), (12, 0))],
    )
    .unwrap();
    assert_eq!(slots, vec![free((9, 0), (10, 0)), free((12, 0), (17, 0))]);
}

#[test]
fn overlapping_busy_intervals_merge() {
    // 10:00-11:30 and 11:00-12:00 form one block 10:00-12:00.
    let slots = compute_free_slots(
        &workday(),
        &[busy((10, 0), (11, 30)), busy((11, 0), (12, 0))],
    )
    .unwrap();
    assert_eq!(slots, vec![free((9, 0), (10, 0)), free((12, 0), (17, 0))]);
}

#[test]
fn nested_busy_interval_does_not_pull_cursor_back() {
    let slots = compute_free_slots(
        &workday(),
        &[busy((10, 0), (14, 0)), busy((11, 0), (12, 0))],
    )
    .unwrap();
    assert_eq!(slots, vec![free((9, 0), (10, 0)), free((14, 0), (17, 0))]);
}

#[test]
fn unordered_busy_intervals_are_sorted() {
    let ordered = compute_free_slots(
        &workday(),
        &[busy((10, 0), (10, 30)), busy((13, 0), (14, 0))],
    )
    .unwrap();
    let reversed = compute_free_slots(
        &workday(),
        &[busy((13, 0), (14, 0)), busy((10, 0), (10, 30))],
    )
    .unwrap();
    assert_eq!(ordered, reversed);
}

#[test]
fn busy_entirely_outside_window_is_ignored() {
    let slots = compute_free_slots(
        &workday(),
        &[busy((6, 0), (8, 0)), busy((18, 0), (19, 0))],
    )
    .unwrap();
    assert_eq!(slots, vec![free((9, 0), (17, 0))]);
}

#[test]
fn busy_running_past_window_end_is_clipped() {
    let slots = compute_free_slots(&workday(), &[busy((16, 0), (18, 0))]).unwrap();
    assert_eq!(slots, vec![free((9, 0), (16, 0))]);
}

#[test]
fn zero_length_busy_interval_does_not_split_a_gap() {
    let slots = compute_free_slots(&workday(), &[busy((12, 0), (12, 0))]).unwrap();
    assert_eq!(slots, vec![free((9, 0), (17, 0))]);
}

#[test]
fn zero_length_window_has_no_free_slots() {
    let window = TimeWindow::new(at(9, 0), at(9, 0)).unwrap();
    assert!(compute_free_slots(&window, &[]).unwrap().is_empty());
}

#[test]
fn repeated_calls_return_identical_results() {
    let input = [busy((11, 0), (12, 0)), busy((9, 30), (10, 0))];
    let first = compute_free_slots(&workday(), &input).unwrap();
    let second = compute_free_slots(&workday(), &input).unwrap();
    assert_eq!(first, second);
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn reversed_window_is_rejected() {
    let window = TimeWindow {
        start: at(17, 0),
        end: at(9, 0),
    };
    let err = compute_free_slots(&window, &[]).unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidWindow { .. }));
}

#[test]
fn reversed_busy_interval_is_rejected_with_its_index() {
    let err = compute_free_slots(
        &workday(),
        &[busy((10, 0), (11, 0)), busy((14, 0), (13, 0))],
    )
    .unwrap_err();
    assert_eq!(
        err,
        AvailabilityError::InvalidBusyInterval {
            index: 1,
            start: at(14, 0),
            end: at(13, 0),
        }
    );
}

#[test]
fn reversed_busy_interval_outside_window_is_still_rejected() {
    let err = compute_free_slots(&workday(), &[busy((20, 0), (19, 0))]).unwrap_err();
    assert!(matches!(
        err,
        AvailabilityError::InvalidBusyInterval { index: 0, .. }
    ));
}

// ── normalize_busy ──────────────────────────────────────────────────────────

#[test]
fn normalize_busy_sorts_clips_and_merges() {
    let merged = normalize_busy(
        &workday(),
        &[
            busy((15, 0), (18, 0)),
            busy((10, 0), (11, 0)),
            busy((8, 0), (9, 15)),
            busy((11, 0), (11, 45)),
        ],
    )
    .unwrap();

    assert_eq!(
        merged,
        vec![
            busy((9, 0), (9, 15)),
            busy((10, 0), (11, 45)),
            busy((15, 0), (17, 0)),
        ]
    );
}

// ── find_first_free_slot ────────────────────────────────────────────────────

#[test]
fn find_first_free_slot_with_minimum_duration() {
    // Gaps: 09:00-09:30 (30), 10:00-12:00 (120)
    let slot = find_first_free_slot(
        &workday(),
        &[busy((9, 30), (10, 0)), busy((12, 0), (17, 0))],
        Duration::minutes(60),
    )
    .unwrap();
    assert_eq!(slot, Some(free((10, 0), (12, 0))));
}

#[test]
fn find_first_free_slot_no_gap_large_enough() {
    let slot = find_first_free_slot(
        &workday(),
        &[busy((9, 0), (10, 0)), busy((10, 15), (17, 0))],
        Duration::minutes(60),
    )
    .unwrap();
    assert!(slot.is_none(), "no gap large enough should return None");
}

#[test]
fn find_first_free_slot_rejects_negative_duration() {
    let err = find_first_free_slot(&workday(), &[], Duration::minutes(-5)).unwrap_err();
    assert_eq!(err, AvailabilityError::InvalidDuration(Duration::minutes(-5)));
}

#[test]
fn sub_minute_negative_duration_keeps_its_sign_in_the_message() {
    let err = find_first_free_slot(&workday(), &[], Duration::seconds(-30)).unwrap_err();
    assert_eq!(err, AvailabilityError::InvalidDuration(Duration::seconds(-30)));
    assert_eq!(err.to_string(), "Invalid duration: -PT30S");
}
