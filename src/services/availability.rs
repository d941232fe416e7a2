//! Basic (location-wide) availability computation.
//!
//! The simpler of the two availability paths: one schedule pool per
//! location/offering, no resource dimension. Slot generation and conflict
//! resolution are delegated to [`crate::services::slots`]; this module only
//! orchestrates the store lookups around them.

use chrono::NaiveDate;
use tracing::debug;

use crate::api::AvailabilitySlot;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::time::{weekday_index, DayWindow};
use crate::models::{Block, Booking, LocationId, OfferingId, Schedule};
use crate::services::slots::{slot_is_free, slot_windows, ResourceScope};

/// Validated input of an availability computation.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub location_id: LocationId,
    pub offering_id: OfferingId,
    pub date: NaiveDate,
    /// Caller override of the offering's default duration, in minutes.
    pub duration: Option<i64>,
}

/// Failure modes of the availability services.
///
/// Empty-but-valid results (no schedule rows, nothing bookable) are not
/// errors; they surface as empty slot lists.
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Offering not found")]
    OfferingNotFound,
    #[error("Standort nicht gefunden")]
    LocationNotFound,
    /// A staff filter matched nothing at this location.
    #[error("Staff member not found")]
    StaffNotFound,
    /// Aggregation was requested but the location has no staff at all.
    #[error("No staff members found")]
    NoStaffMembers,
    /// Store failure; aborts the whole computation, never partial results.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Compute the bookable slots of one location/offering/date pool.
///
/// Resolves the slot duration from the offering (or the caller's override),
/// pulls the weekday's active schedule rows, and annotates every candidate
/// slot against the location's bookings and blocks. Zero schedule rows yield
/// an empty list, not an error.
pub async fn location_availability(
    repo: &dyn FullRepository,
    query: &AvailabilityQuery,
) -> Result<Vec<AvailabilitySlot>, AvailabilityError> {
    let offering = repo
        .fetch_offering(query.offering_id)
        .await?
        .ok_or(AvailabilityError::OfferingNotFound)?;

    // The timezone is carried for the caller's benefit only; slot arithmetic
    // stays in naive wall-clock time.
    let location = repo
        .fetch_location(query.location_id)
        .await?
        .ok_or(AvailabilityError::LocationNotFound)?;

    let duration_minutes = query.duration.unwrap_or(offering.duration_minutes);
    debug!(
        location = %location.id,
        timezone = %location.timezone,
        duration_minutes,
        date = %query.date,
        "computing location availability"
    );

    let schedules = repo
        .fetch_schedules(query.location_id, weekday_index(query.date), None)
        .await?;
    if schedules.is_empty() {
        return Ok(Vec::new());
    }

    let window = DayWindow::for_date(query.date);
    let bookings = repo
        .fetch_bookings(query.location_id, query.offering_id, &window, None)
        .await?;
    let blocks = repo.fetch_blocks(&window, Some(query.location_id)).await?;

    Ok(build_slots(
        query.date,
        &schedules,
        duration_minutes,
        ResourceScope::Location,
        &bookings,
        &blocks,
    ))
}

/// Annotated slots for a set of schedule rows, in row order.
///
/// Rows are processed independently and their slot runs concatenated;
/// overlapping rows may yield duplicate start times, which is intentional.
pub(crate) fn build_slots(
    date: NaiveDate,
    schedules: &[Schedule],
    duration_minutes: i64,
    scope: ResourceScope,
    bookings: &[Booking],
    blocks: &[Block],
) -> Vec<AvailabilitySlot> {
    let mut slots = Vec::new();
    for row in schedules {
        for window in slot_windows(date, row.start_time, row.end_time, duration_minutes) {
            slots.push(AvailabilitySlot {
                start_time: window.start,
                end_time: window.end,
                available: slot_is_free(&window, scope, bookings, blocks),
            });
        }
    }
    slots
}
