//! Compute free time slots from busy intervals.
//!
//! Validates the inputs, clips busy intervals to the window, sorts and merges
//! them, then walks a cursor across the merged list emitting the gaps.
//! Input order is not trusted: a provider that returns intervals out of order
//! or overlapping gets the same answer as one that returns them clean.

use chrono::Duration;
use tracing::{debug, trace};

use crate::error::{AvailabilityError, Result};
use crate::interval::{BusyInterval, FreeInterval, TimeWindow};

/// Reject a reversed window or any reversed busy interval.
///
/// The first offending busy interval is reported with its position in `busy`.
pub(crate) fn validate_inputs(window: &TimeWindow, busy: &[BusyInterval]) -> Result<()> {
    window.validate()?;
    if let Some((index, b)) = busy.iter().enumerate().find(|(_, b)| b.start > b.end) {
        return Err(AvailabilityError::InvalidBusyInterval {
            index,
            start: b.start,
            end: b.end,
        });
    }
    Ok(())
}

/// Clip, sort and merge already-validated busy intervals.
pub(crate) fn merge_clipped(window: &TimeWindow, busy: &[BusyInterval]) -> Vec<BusyInterval> {
    // Discard instants and intervals entirely outside the window; trim the rest.
    let mut intervals: Vec<BusyInterval> = busy
        .iter()
        .filter(|b| b.start < b.end)
        .filter_map(|b| window.clip(b))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    if !intervals.windows(2).all(|pair| pair[0] <= pair[1]) {
        debug!(count = intervals.len(), "busy intervals arrived out of order, sorting");
    }
    // Sort by start time, then by end time for stability.
    intervals.sort_unstable();

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Overlapping or adjacent, extend the current block.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Normalize busy intervals against a window.
///
/// Returns a sorted, non-overlapping, non-adjacent list of busy blocks, each
/// clipped to the window. Zero-length intervals and intervals outside the
/// window are dropped.
///
/// # Errors
/// `InvalidWindow` if `window.start > window.end`; `InvalidBusyInterval` for
/// the first busy interval with `start > end`.
pub fn normalize_busy(window: &TimeWindow, busy: &[BusyInterval]) -> Result<Vec<BusyInterval>> {
    validate_inputs(window, busy)?;
    Ok(merge_clipped(window, busy))
}

/// Gap walk over a sorted, merged, clipped busy list.
pub(crate) fn gaps(window: &TimeWindow, merged: &[BusyInterval]) -> Vec<FreeInterval> {
    let mut free_slots = Vec::with_capacity(merged.len() + 1);
    let mut cursor = window.start;

    for busy in merged {
        if cursor < busy.start {
            free_slots.push(FreeInterval {
                start: cursor,
                end: busy.start,
            });
        }
        cursor = cursor.max(busy.end);
    }

    // Trailing free slot after the last busy period.
    if cursor < window.end {
        free_slots.push(FreeInterval {
            start: cursor,
            end: window.end,
        });
    }

    free_slots
}

/// Find the free intervals within `window` not covered by any of `busy`.
///
/// Busy intervals may be unsorted, overlapping, adjacent or partly outside the
/// window. The result is sorted by start time, every interval lies inside the
/// window, and no zero-length interval is ever emitted.
///
/// - No busy intervals: one free interval spanning the whole window.
/// - Busy intervals covering the window: an empty result.
///
/// # Errors
/// `InvalidWindow` or `InvalidBusyInterval` when an input has `start > end`.
/// Nothing is computed in that case.
pub fn compute_free_slots(window: &TimeWindow, busy: &[BusyInterval]) -> Result<Vec<FreeInterval>> {
    validate_inputs(window, busy)?;
    let merged = merge_clipped(window, busy);
    let free = gaps(window, &merged);

    trace!(
        busy = busy.len(),
        merged = merged.len(),
        free = free.len(),
        "computed free slots"
    );

    Ok(free)
}

/// Find the first free interval of at least `min_duration` within the window.
///
/// Delegates to [`compute_free_slots`] and returns the first slot meeting the
/// minimum duration requirement.
///
/// # Errors
/// `InvalidDuration` for a negative `min_duration`, plus the validation errors
/// of [`compute_free_slots`].
pub fn find_first_free_slot(
    window: &TimeWindow,
    busy: &[BusyInterval],
    min_duration: Duration,
) -> Result<Option<FreeInterval>> {
    if min_duration < Duration::zero() {
        return Err(AvailabilityError::InvalidDuration(min_duration));
    }
    Ok(compute_free_slots(window, busy)?
        .into_iter()
        .find(|slot| slot.duration() >= min_duration))
}
