//! Slot generation and conflict resolution.
//!
//! This is the shared core of both availability paths: a stride-based
//! candidate-slot generator over a schedule row's wall-clock window, and an
//! open-interval overlap test against bookings and blocks. Both are pure
//! functions of their inputs; the same engine serves the location-wide pool
//! and the per-staff path, parameterized by [`ResourceScope`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::time::at_wall_clock;
use crate::models::{Block, Booking, ResourceId};

/// Fixed stride between candidate slot starts, independent of the requested
/// duration. Services longer than the stride yield overlapping candidates
/// (a 45-minute service can start at :00 and :30).
pub const SLOT_STRIDE_MINUTES: i64 = 30;

/// A candidate slot interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SlotWindow {
    /// Open-interval intersection test against `[other_start, other_end)`.
    pub fn overlaps(&self, other_start: NaiveDateTime, other_end: NaiveDateTime) -> bool {
        self.start < other_end && self.end > other_start
    }
}

/// Lazy cursor over the candidate slots of one schedule row.
///
/// Emits `[cursor, cursor + duration)` windows in increasing start order,
/// advancing by [`SLOT_STRIDE_MINUTES`] per step, and stops once the next
/// window would run past the row's end. The last slot may end exactly on the
/// row boundary. Cloning the cursor restarts the sequence from its current
/// position.
#[derive(Debug, Clone)]
pub struct SlotCursor {
    cursor: NaiveDateTime,
    row_end: NaiveDateTime,
    duration: Duration,
}

impl Iterator for SlotCursor {
    type Item = SlotWindow;

    fn next(&mut self) -> Option<SlotWindow> {
        let end = self.cursor + self.duration;
        if end > self.row_end {
            return None;
        }
        let slot = SlotWindow {
            start: self.cursor,
            end,
        };
        self.cursor = self.cursor + Duration::minutes(SLOT_STRIDE_MINUTES);
        Some(slot)
    }
}

/// Candidate slots for one schedule row on one date.
///
/// `row_start` and `row_end` are the row's wall-clock bounds; no timezone
/// conversion is applied. If the requested duration exceeds the window the
/// sequence is empty.
pub fn slot_windows(
    date: NaiveDate,
    row_start: NaiveTime,
    row_end: NaiveTime,
    duration_minutes: i64,
) -> SlotCursor {
    SlotCursor {
        cursor: at_wall_clock(date, row_start),
        row_end: at_wall_clock(date, row_end),
        duration: Duration::minutes(duration_minutes),
    }
}

/// Which obstructions apply to a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    /// Single location-wide pool: every booking and block obstructs.
    Location,
    /// Per-resource pool: bookings must match the resource; blocks match
    /// when location-wide (no resource id) or tied to this resource.
    Resource(ResourceId),
}

impl ResourceScope {
    fn booking_applies(&self, booking: &Booking) -> bool {
        match self {
            ResourceScope::Location => true,
            ResourceScope::Resource(id) => booking.resource_id == Some(*id),
        }
    }

    fn block_applies(&self, block: &Block) -> bool {
        match self {
            ResourceScope::Location => true,
            ResourceScope::Resource(id) => {
                block.resource_id.is_none() || block.resource_id == Some(*id)
            }
        }
    }
}

/// Conflict verdict for one candidate slot.
///
/// A slot is free unless some in-scope booking with an obstructing status or
/// some in-scope block overlaps it. Short-circuits on the first hit.
pub fn slot_is_free(
    slot: &SlotWindow,
    scope: ResourceScope,
    bookings: &[Booking],
    blocks: &[Block],
) -> bool {
    for booking in bookings {
        if booking.status.obstructs()
            && scope.booking_applies(booking)
            && slot.overlaps(booking.start_time, booking.end_time)
        {
            return false;
        }
    }

    for block in blocks {
        if scope.block_applies(block) && slot.overlaps(block.start_time, block.end_time) {
            return false;
        }
    }

    true
}
