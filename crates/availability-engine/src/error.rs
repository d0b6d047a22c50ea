//! Error types for availability-engine operations.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("Invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid busy interval at index {index}: start {start} is after end {end}")]
    InvalidBusyInterval {
        index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Rendered as an ISO 8601 duration, so sub-minute values keep their sign.
    #[error("Invalid duration: {0}")]
    InvalidDuration(Duration),

    #[error("Invalid proposed meeting: start {start} is after end {end}")]
    InvalidMeeting {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Proposed meeting {start} to {end} is outside the window {window_start} to {window_end}")]
    MeetingOutsideWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A wall-clock time that falls into a DST gap in the given timezone.
    #[error("Local time {local} does not exist in {timezone}")]
    NonexistentLocalTime { local: String, timezone: String },
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
