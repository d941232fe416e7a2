//! Staff-aware availability and the aggregated capacity rollup.
//!
//! Runs the slot engine once per staff resource and composes the result into
//! one of three response shapes: a single member, the per-staff breakdown,
//! or the location-wide capacity summary with peak/free hour ranking.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::api::{
    AggregatedAvailability, CapacityStatus, EnhancedAvailability, StaffAvailability,
    StaffUtilization,
};
use crate::db::repository::FullRepository;
use crate::models::time::{hour_label, truncate_to_hour, weekday_index, DayWindow};
use crate::models::{Block, Booking, LocationId, OfferingId, Resource, ResourceId, Schedule};
use crate::services::availability::{build_slots, AvailabilityError};
use crate::services::slots::ResourceScope;

/// Validated input of a staff-aware availability computation.
#[derive(Debug, Clone)]
pub struct StaffAvailabilityQuery {
    pub location_id: LocationId,
    pub offering_id: OfferingId,
    pub date: NaiveDate,
    /// Narrow the computation to one staff member.
    pub staff_id: Option<ResourceId>,
    /// Merge all members into the capacity summary.
    pub aggregated: bool,
    /// Caller override of the offering's default duration, in minutes.
    pub duration: Option<i64>,
}

/// Compute staff-aware availability for a location/offering/date.
///
/// Response shape depends on the query: `staff_id` set yields the individual
/// variant, `aggregated` the capacity rollup, otherwise the per-staff
/// breakdown. A staff filter that matches nothing (wrong location, inactive,
/// not staff) is an error, as is aggregation over a staff-less location.
pub async fn staff_availability(
    repo: &dyn FullRepository,
    query: &StaffAvailabilityQuery,
) -> Result<EnhancedAvailability, AvailabilityError> {
    let offering = repo
        .fetch_offering(query.offering_id)
        .await?
        .ok_or(AvailabilityError::OfferingNotFound)?;

    let location = repo
        .fetch_location(query.location_id)
        .await?
        .ok_or(AvailabilityError::LocationNotFound)?;

    let staff = repo
        .fetch_active_staff(query.location_id, query.staff_id)
        .await?;
    if staff.is_empty() {
        return Err(if query.aggregated {
            AvailabilityError::NoStaffMembers
        } else {
            AvailabilityError::StaffNotFound
        });
    }

    let duration_minutes = query.duration.unwrap_or(offering.duration_minutes);
    debug!(
        location = %location.id,
        staff_count = staff.len(),
        duration_minutes,
        date = %query.date,
        "computing staff availability"
    );

    let staff_ids: Vec<ResourceId> = staff.iter().map(|s| s.id).collect();
    let window = DayWindow::for_date(query.date);

    let schedules = repo
        .fetch_schedules(
            query.location_id,
            weekday_index(query.date),
            Some(staff_ids.as_slice()),
        )
        .await?;
    let bookings = repo
        .fetch_bookings(
            query.location_id,
            query.offering_id,
            &window,
            Some(staff_ids.as_slice()),
        )
        .await?;
    // Blocks are pulled for the whole window; location-wide and per-resource
    // scoping happens in the conflict resolver.
    let blocks = repo.fetch_blocks(&window, None).await?;

    let availabilities: Vec<StaffAvailability> = staff
        .iter()
        .map(|member| {
            build_staff_availability(member, &schedules, query.date, duration_minutes, &bookings, &blocks)
        })
        .collect();

    if query.staff_id.is_some() {
        // fetch_active_staff returned exactly the requested member
        let mut availabilities = availabilities;
        let staff_member = availabilities.swap_remove(0);
        return Ok(EnhancedAvailability::Individual {
            date: query.date,
            staff_member,
        });
    }

    if query.aggregated {
        let aggregated = aggregate(query.date, &availabilities);
        return Ok(EnhancedAvailability::Aggregated {
            aggregated,
            staff_details: availabilities,
        });
    }

    Ok(EnhancedAvailability::Multi {
        date: query.date,
        staff_availabilities: availabilities,
    })
}

/// One member's slot calendar plus utilization metrics.
fn build_staff_availability(
    member: &Resource,
    schedules: &[Schedule],
    date: NaiveDate,
    duration_minutes: i64,
    bookings: &[Booking],
    blocks: &[Block],
) -> StaffAvailability {
    let rows: Vec<Schedule> = schedules
        .iter()
        .filter(|s| s.resource_id == member.id)
        .cloned()
        .collect();

    let slots = build_slots(
        date,
        &rows,
        duration_minutes,
        ResourceScope::Resource(member.id),
        bookings,
        blocks,
    );

    let total_slots = slots.len();
    let available_slots = slots.iter().filter(|s| s.available).count();

    StaffAvailability {
        staff_id: member.id,
        staff_name: member.name.clone(),
        slots,
        available_slots,
        total_slots,
        utilization_rate: utilization_rate(total_slots, available_slots),
    }
}

/// Percentage of generated slots that are booked or blocked; 0 when no
/// slots were generated.
pub fn utilization_rate(total_slots: usize, available_slots: usize) -> f64 {
    if total_slots == 0 {
        return 0.0;
    }
    (total_slots - available_slots) as f64 / total_slots as f64 * 100.0
}

/// Traffic-light classification of the free fraction, in percent.
pub fn classify_status(availability_rate: f64) -> CapacityStatus {
    if availability_rate > 50.0 {
        CapacityStatus::Green
    } else if availability_rate > 20.0 {
        CapacityStatus::Orange
    } else {
        CapacityStatus::Red
    }
}

/// Merge per-staff calendars into the location-wide capacity summary.
///
/// Hour buckets are keyed by the containing hour of each pooled slot start,
/// in first-appearance order, and ranked by how many pooled slots in the
/// bucket are available: the three lowest become `peak_hours`, the three
/// highest `free_slots` (fewer than three buckets: all of them, no padding).
///
/// `available_capacity` floors the staff-count-scaled availability ratio
/// while `booked_capacity` subtracts its ceiling from the staff count; the
/// two need not sum to `total_capacity`.
pub fn aggregate(date: NaiveDate, staff: &[StaffAvailability]) -> AggregatedAvailability {
    let total_slots: usize = staff.iter().map(|s| s.total_slots).sum();
    let total_available: usize = staff.iter().map(|s| s.available_slots).sum();

    let mut buckets: Vec<(NaiveDateTime, usize)> = Vec::new();
    for slot in staff.iter().flat_map(|s| s.slots.iter()) {
        let key = truncate_to_hour(slot.start_time);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, available)) => *available += usize::from(slot.available),
            None => buckets.push((key, usize::from(slot.available))),
        }
    }
    // Stable sort keeps first-appearance order among equal counts
    buckets.sort_by_key(|&(_, available)| available);

    let peak_hours = buckets
        .iter()
        .take(3)
        .map(|&(key, _)| hour_label(key))
        .collect();
    let free_slots = buckets
        .iter()
        .skip(buckets.len().saturating_sub(3))
        .map(|&(key, _)| hour_label(key))
        .collect();

    let capacity = staff.len();
    let ratio = total_available as f64 / total_slots.max(1) as f64;
    let available_capacity = (ratio * capacity as f64).floor() as usize;
    let booked_capacity = capacity - (ratio * capacity as f64).ceil() as usize;

    let utilization = utilization_rate(total_slots, total_available);

    AggregatedAvailability {
        date,
        total_capacity: capacity,
        booked_capacity,
        available_capacity,
        utilization_rate: utilization,
        peak_hours,
        free_slots,
        status: classify_status(100.0 - utilization),
        staff_summary: staff
            .iter()
            .map(|s| StaffUtilization {
                staff_id: s.staff_id,
                staff_name: s.staff_name.clone(),
                utilization: s.utilization_rate,
            })
            .collect(),
    }
}
