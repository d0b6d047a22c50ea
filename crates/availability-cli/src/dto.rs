//! Serde-friendly DTOs for the JSON documents the CLI reads and writes.
//!
//! Timestamps cross the boundary as strings. Input strings are either RFC 3339
//! or naive wall-clock times in the configured timezone; output strings are
//! RFC 3339 rendered in that same timezone.

use anyhow::{Context, Result};
use availability_engine::{
    parse_timestamp, BusyInterval, CalendarBusy, CalendarConflict, FreeInterval, TimeWindow,
    UnifiedAvailability,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct IntervalInput {
    pub start: String,
    pub end: String,
}

impl IntervalInput {
    fn parse(&self, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_timestamp(&self.start, tz)
            .with_context(|| format!("Failed to parse start '{}'", self.start))?;
        let end = parse_timestamp(&self.end, tz)
            .with_context(|| format!("Failed to parse end '{}'", self.end))?;
        Ok((start, end))
    }

    pub fn to_window(&self, tz: Tz) -> Result<TimeWindow> {
        let (start, end) = self.parse(tz)?;
        Ok(TimeWindow::new(start, end)?)
    }

    /// Ordering is left to the engine so errors carry the interval's index.
    pub fn to_busy(&self, tz: Tz) -> Result<BusyInterval> {
        let (start, end) = self.parse(tz)?;
        Ok(BusyInterval { start, end })
    }
}

/// `{"window": {...}, "busy": [...]}`: a single calendar.
#[derive(Debug, Deserialize)]
pub struct FreeBusyInput {
    pub window: IntervalInput,
    #[serde(default)]
    pub busy: Vec<IntervalInput>,
}

impl FreeBusyInput {
    pub fn resolve(&self, tz: Tz) -> Result<(TimeWindow, Vec<BusyInterval>)> {
        let window = self.window.to_window(tz).context("Invalid window")?;
        let busy = self
            .busy
            .iter()
            .map(|b| b.to_busy(tz))
            .collect::<Result<Vec<_>>>()?;
        Ok((window, busy))
    }
}

#[derive(Debug, Deserialize)]
pub struct CalendarInput {
    pub id: String,
    #[serde(default)]
    pub busy: Vec<IntervalInput>,
}

/// `{"window": {...}, "calendars": [{"id": ..., "busy": [...]}, ...]}`.
#[derive(Debug, Deserialize)]
pub struct CalendarsInput {
    pub window: IntervalInput,
    #[serde(default)]
    pub calendars: Vec<CalendarInput>,
}

impl CalendarsInput {
    pub fn resolve(&self, tz: Tz) -> Result<(TimeWindow, Vec<CalendarBusy>)> {
        let window = self.window.to_window(tz).context("Invalid window")?;
        let calendars = self
            .calendars
            .iter()
            .map(|c| -> Result<CalendarBusy> {
                let busy = c
                    .busy
                    .iter()
                    .map(|b| b.to_busy(tz))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Invalid busy interval in calendar '{}'", c.id))?;
                Ok(CalendarBusy {
                    calendar_id: c.id.clone(),
                    busy,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((window, calendars))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn render(dt: &DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).to_rfc3339()
}

#[derive(Debug, Serialize)]
pub struct IntervalDto {
    pub start: String,
    pub end: String,
}

impl IntervalDto {
    pub fn new(start: &DateTime<Utc>, end: &DateTime<Utc>, tz: Tz) -> Self {
        Self {
            start: render(start, tz),
            end: render(end, tz),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FreeSlotDto {
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}

impl FreeSlotDto {
    pub fn new(slot: &FreeInterval, tz: Tz) -> Self {
        Self {
            start: render(&slot.start, tz),
            end: render(&slot.end, tz),
            duration_minutes: slot.duration_minutes(),
        }
    }

    pub fn list(slots: &[FreeInterval], tz: Tz) -> Vec<Self> {
        slots.iter().map(|s| Self::new(s, tz)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct BusyBlockDto {
    pub start: String,
    pub end: String,
    pub source_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityDto {
    pub window: IntervalDto,
    pub privacy: availability_engine::PrivacyLevel,
    pub busy: Vec<BusyBlockDto>,
    pub free: Vec<FreeSlotDto>,
}

impl AvailabilityDto {
    pub fn new(unified: &UnifiedAvailability, tz: Tz) -> Self {
        Self {
            window: IntervalDto::new(&unified.window.start, &unified.window.end, tz),
            privacy: unified.privacy,
            busy: unified
                .busy
                .iter()
                .map(|b| BusyBlockDto {
                    start: render(&b.start, tz),
                    end: render(&b.end, tz),
                    source_count: b.source_count,
                })
                .collect(),
            free: FreeSlotDto::list(&unified.free, tz),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConflictDto {
    pub calendar_id: String,
    pub busy: IntervalDto,
    pub overlap_minutes: i64,
}

impl ConflictDto {
    pub fn new(found: &CalendarConflict, tz: Tz) -> Self {
        Self {
            calendar_id: found.calendar_id.clone(),
            busy: IntervalDto::new(&found.busy.start, &found.busy.end, tz),
            overlap_minutes: found.overlap_minutes,
        }
    }
}
