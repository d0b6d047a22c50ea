//! Multi-calendar availability merging with privacy-preserving output.
//!
//! Accepts N busy streams (one per attendee or per connected calendar), merges
//! them into unified busy/free blocks within a time window. Supports privacy
//! levels to control how much source information is exposed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::freebusy;
use crate::interval::{BusyInterval, FreeInterval, TimeWindow};

/// Busy intervals reported by a single calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarBusy {
    /// Opaque identifier for this calendar (e.g., "alice@example.com", "work-google").
    pub calendar_id: String,
    /// Busy intervals as returned by the provider, in any order.
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
}

/// Privacy level for availability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    /// Show time ranges and source count per busy block.
    Full,
    /// Show only busy/free time ranges. `source_count` is 0 on every block.
    #[default]
    Opaque,
}

/// A merged busy block in the unified availability view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Number of calendars that contributed to this block.
    /// Set to 0 when privacy is `Opaque`.
    pub source_count: usize,
}

/// Unified availability result after merging N calendars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedAvailability {
    /// Merged busy blocks (sorted by start, non-overlapping).
    pub busy: Vec<BusyBlock>,
    /// Free intervals (gaps between busy blocks within the window).
    pub free: Vec<FreeInterval>,
    pub window: TimeWindow,
    pub privacy: PrivacyLevel,
}

/// Validate every calendar and flatten their busy intervals into one list.
fn flatten(window: &TimeWindow, calendars: &[CalendarBusy]) -> Result<Vec<BusyInterval>> {
    window.validate()?;
    for calendar in calendars {
        freebusy::validate_inputs(window, &calendar.busy)?;
    }
    Ok(calendars
        .iter()
        .flat_map(|c| c.busy.iter().copied())
        .collect())
}

/// Merge N calendars into unified availability within a time window.
///
/// All busy intervals from all calendars are flattened, clipped to the window,
/// and merged into non-overlapping busy blocks. Free intervals are the gaps
/// between busy blocks.
///
/// When `privacy` is `Opaque`, `source_count` is set to 0 on all busy blocks.
///
/// # Errors
/// `InvalidWindow` for a reversed window; `InvalidBusyInterval` for a reversed
/// busy interval in any calendar (the index is its position in that calendar).
pub fn merge_availability(
    calendars: &[CalendarBusy],
    window: &TimeWindow,
    privacy: PrivacyLevel,
) -> Result<UnifiedAvailability> {
    let all_busy = flatten(window, calendars)?;
    let merged = freebusy::merge_clipped(window, &all_busy);
    let free = freebusy::gaps(window, &merged);

    let busy = match privacy {
        PrivacyLevel::Full => busy_blocks_with_sources(calendars, &merged, window),
        PrivacyLevel::Opaque => merged
            .iter()
            .map(|b| BusyBlock {
                start: b.start,
                end: b.end,
                source_count: 0,
            })
            .collect(),
    };

    Ok(UnifiedAvailability {
        busy,
        free,
        window: *window,
        privacy,
    })
}

/// Find the first free interval of at least `min_duration` across all calendars.
pub fn find_first_free_across(
    calendars: &[CalendarBusy],
    window: &TimeWindow,
    min_duration: Duration,
) -> Result<Option<FreeInterval>> {
    let all_busy = flatten(window, calendars)?;
    freebusy::find_first_free_slot(window, &all_busy, min_duration)
}

/// Compute busy blocks with per-block source counts.
///
/// For each merged block, count how many distinct calendars have at least one
/// busy interval overlapping it after clipping to the window.
fn busy_blocks_with_sources(
    calendars: &[CalendarBusy],
    merged: &[BusyInterval],
    window: &TimeWindow,
) -> Vec<BusyBlock> {
    merged
        .iter()
        .map(|block| {
            let source_count = calendars
                .iter()
                .filter(|calendar| {
                    calendar
                        .busy
                        .iter()
                        .filter(|b| b.start < b.end)
                        .filter_map(|b| window.clip(b))
                        .any(|clipped| clipped.overlaps(block))
                })
                .count();
            BusyBlock {
                start: block.start,
                end: block.end,
                source_count,
            }
        })
        .collect()
}
