//! Wall-clock time helpers for availability computation.
//!
//! All slot arithmetic runs in naive local time: the requested calendar date
//! combined with the schedule rows' `HH:MM` wall-clock values. No timezone
//! conversion is applied anywhere in the engine (the location's stored IANA
//! zone is intentionally unused here).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// The day window obstruction queries are evaluated against.
///
/// Spans `[date 00:00:00, date 23:59:59.999]`. Bookings and blocks qualify
/// only when fully contained in the window; rows spanning midnight fall
/// outside it and are not considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    /// Build the obstruction-query window for a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        let end = date
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("end of day is always valid");
        DayWindow { start, end }
    }

    /// Whether `[start, end]` lies fully inside this window.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Weekday index of a date, 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Combine a calendar date with a wall-clock time.
pub fn at_wall_clock(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Truncate a timestamp to the start of its containing hour.
pub fn truncate_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date()
        .and_hms_opt(ts.hour(), 0, 0)
        .expect("hour truncation is always valid")
}

/// Label for an hour bucket, e.g. `2025-03-14T09:00`.
pub fn hour_label(ts: NaiveDateTime) -> String {
    truncate_to_hour(ts).format("%Y-%m-%dT%H:00").to_string()
}
