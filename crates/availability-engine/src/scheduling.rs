//! Meeting-time suggestions and proposed-meeting checks across attendee calendars.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::{self, CalendarBusy, PrivacyLevel};
use crate::error::{AvailabilityError, Result};
use crate::freebusy;
use crate::interval::{BusyInterval, FreeInterval, TimeWindow};

/// A request for candidate meeting times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingRequest {
    /// Range the meeting must fit inside.
    pub window: TimeWindow,
    /// Length of the meeting. Must be positive.
    pub duration: Duration,
    /// Upper bound on the number of suggestions returned.
    pub max_suggestions: usize,
}

/// A busy interval in one attendee calendar that a proposed meeting runs into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConflict {
    pub calendar_id: String,
    /// Position of `busy` in that calendar's list.
    pub index: usize,
    pub busy: BusyInterval,
    /// Minutes of the proposed meeting that `busy` covers.
    pub overlap_minutes: i64,
}

/// Suggest meeting slots of exactly `request.duration` where every calendar is free.
///
/// Free intervals are computed across all calendars and each one is cut into
/// back-to-back candidates starting at the interval's start. A free interval
/// shorter than the meeting contributes nothing, and so does one whose end
/// would fall past the representable date range.
/// Suggestions are in chronological order and capped at `request.max_suggestions`.
///
/// # Errors
/// `InvalidDuration` if the duration is zero or negative, plus the validation
/// errors of [`availability::merge_availability`].
pub fn suggest_meeting_times(
    request: &MeetingRequest,
    calendars: &[CalendarBusy],
) -> Result<Vec<FreeInterval>> {
    if request.duration <= Duration::zero() {
        return Err(AvailabilityError::InvalidDuration(request.duration));
    }

    let unified = availability::merge_availability(calendars, &request.window, PrivacyLevel::Opaque)?;

    let mut suggestions = Vec::new();
    'slots: for free in &unified.free {
        let mut start = free.start;
        while let Some(end) = start.checked_add_signed(request.duration) {
            if end > free.end {
                break;
            }
            if suggestions.len() >= request.max_suggestions {
                break 'slots;
            }
            suggestions.push(FreeInterval { start, end });
            start = end;
        }
    }

    debug!(
        calendars = calendars.len(),
        free = unified.free.len(),
        suggestions = suggestions.len(),
        "suggested meeting times"
    );

    Ok(suggestions)
}

/// Report every busy interval, per calendar, that a proposed meeting overlaps.
///
/// The meeting must lie inside `window`, and the calendars are validated the
/// same way [`availability::merge_availability`] validates them. Touching
/// endpoints and zero-length busy intervals are not conflicts. An empty result
/// means every attendee is free for the whole meeting.
///
/// # Errors
/// - `InvalidWindow` for a reversed window
/// - `InvalidMeeting` if the proposed meeting is reversed
/// - `MeetingOutsideWindow` if it starts before or ends after the window
/// - `InvalidBusyInterval` for a reversed busy interval in any calendar
pub fn check_proposed(
    proposed: &BusyInterval,
    window: &TimeWindow,
    calendars: &[CalendarBusy],
) -> Result<Vec<CalendarConflict>> {
    window.validate()?;
    if proposed.start > proposed.end {
        return Err(AvailabilityError::InvalidMeeting {
            start: proposed.start,
            end: proposed.end,
        });
    }
    if !proposed.within(window) {
        return Err(AvailabilityError::MeetingOutsideWindow {
            start: proposed.start,
            end: proposed.end,
            window_start: window.start,
            window_end: window.end,
        });
    }

    let mut found = Vec::new();
    for calendar in calendars {
        freebusy::validate_inputs(window, &calendar.busy)?;
        for (index, busy) in calendar.busy.iter().enumerate() {
            if let Some(shared) = proposed.intersection(busy) {
                found.push(CalendarConflict {
                    calendar_id: calendar.calendar_id.clone(),
                    index,
                    busy: *busy,
                    overlap_minutes: (shared.end - shared.start).num_minutes(),
                });
            }
        }
    }

    debug!(
        calendars = calendars.len(),
        conflicts = found.len(),
        "checked proposed meeting"
    );

    Ok(found)
}
