//! # availability-engine
//!
//! Free/busy computation for meeting scheduling.
//!
//! Given a time window and the busy intervals a calendar provider reports, the
//! engine computes the free intervals inside the window. Inputs are validated,
//! clipped, sorted and merged first, so provider ordering quirks cannot change
//! the answer.
//!
//! ```rust
//! use availability_engine::{compute_free_slots, BusyInterval, TimeWindow};
//!
//! let t = |s: &str| s.parse::<chrono::DateTime<chrono::Utc>>().unwrap();
//! let window = TimeWindow::new(t("2026-03-02T09:00:00Z"), t("2026-03-02T17:00:00Z")).unwrap();
//! let busy = [BusyInterval::new(t("2026-03-02T10:00:00Z"), t("2026-03-02T10:30:00Z")).unwrap()];
//!
//! let free = compute_free_slots(&window, &busy).unwrap();
//! assert_eq!(free.len(), 2);
//! assert_eq!(free[0].duration_minutes(), 60);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `TimeWindow`, `BusyInterval`, `FreeInterval` value types
//! - [`freebusy`] — Compute free slots within a window
//! - [`availability`] — Merge several calendars into one busy/free view
//! - [`scheduling`] — Suggest meeting times, check a proposed meeting for conflicts
//! - [`timestamp`] — Timestamp parsing and timezone normalization
//! - [`error`] — Error types

pub mod availability;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod scheduling;
pub mod timestamp;

pub use availability::{
    find_first_free_across, merge_availability, BusyBlock, CalendarBusy, PrivacyLevel,
    UnifiedAvailability,
};
pub use error::AvailabilityError;
pub use freebusy::{compute_free_slots, find_first_free_slot, normalize_busy};
pub use interval::{BusyInterval, FreeInterval, TimeWindow};
pub use scheduling::{check_proposed, suggest_meeting_times, CalendarConflict, MeetingRequest};
pub use timestamp::{parse_timestamp, parse_timezone};
