//! Value types for availability computation.
//!
//! All three types are plain `(start, end)` pairs of UTC instants. Fields are
//! public; [`TimeWindow::new`] and [`BusyInterval::new`] check the
//! `start <= end` invariant, and the calculator re-checks it on every call.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// The bounding range over which availability is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(AvailabilityError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Clip `interval` to this window. Returns `None` when nothing of it lies
    /// strictly inside.
    pub fn clip(&self, interval: &BusyInterval) -> Option<BusyInterval> {
        if interval.start < self.end && interval.end > self.start {
            Some(BusyInterval {
                start: interval.start.max(self.start),
                end: interval.end.min(self.end),
            })
        } else {
            None
        }
    }
}

/// An occupied period reported by a calendar provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Build a busy interval, rejecting `start > end`.
    ///
    /// Standalone construction has no position in a list, so a failure is
    /// reported with index 0.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AvailabilityError::InvalidBusyInterval {
                index: 0,
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    /// True when the two intervals share time. Touching endpoints do not count.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The time both intervals occupy, or `None` if they share none.
    ///
    /// Zero-length intervals never intersect anything.
    pub fn intersection(&self, other: &BusyInterval) -> Option<BusyInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(BusyInterval { start, end })
    }

    /// True when this interval lies entirely inside `window`.
    pub fn within(&self, window: &TimeWindow) -> bool {
        window.start <= self.start && self.end <= window.end
    }
}

/// An unoccupied gap inside a [`TimeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// View this free gap as a busy block, e.g. once a meeting is booked into it.
    pub fn as_busy(&self) -> BusyInterval {
        BusyInterval {
            start: self.start,
            end: self.end,
        }
    }
}
