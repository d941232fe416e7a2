//! Public API surface for the availability engine.
//!
//! This file consolidates the DTO types returned by the availability
//! endpoints. All types derive Serialize/Deserialize for JSON serialization
//! and use camelCase on the wire.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::ResourceId;

/// One candidate bookable interval, annotated with its conflict verdict.
///
/// Ephemeral: recomputed on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub available: bool,
}

/// One staff member's slot calendar for a day, with utilization metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAvailability {
    pub staff_id: ResourceId,
    pub staff_name: String,
    pub slots: Vec<AvailabilitySlot>,
    pub available_slots: usize,
    pub total_slots: usize,
    /// Percentage of generated slots that are booked or blocked.
    pub utilization_rate: f64,
}

/// Per-staff utilization entry in the aggregated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUtilization {
    pub staff_id: ResourceId,
    pub staff_name: String,
    pub utilization: f64,
}

/// Traffic-light classification of location-wide free capacity.
///
/// Green when more than 50% of slots are free, orange down to (exclusive)
/// 20%, red at 20% and below.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityStatus {
    Green,
    Orange,
    Red,
}

/// Location-wide capacity rollup across all staff resources.
///
/// `available_capacity` and `booked_capacity` are rounded independently
/// (floor vs complement-of-ceil) and are not guaranteed to sum to
/// `total_capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAvailability {
    pub date: NaiveDate,
    pub total_capacity: usize,
    pub booked_capacity: usize,
    pub available_capacity: usize,
    pub utilization_rate: f64,
    /// Up to 3 hour buckets with the least availability.
    pub peak_hours: Vec<String>,
    /// Up to 3 hour buckets with the most availability.
    pub free_slots: Vec<String>,
    pub status: CapacityStatus,
    pub staff_summary: Vec<StaffUtilization>,
}

/// Response of the staff-aware availability endpoint.
///
/// One variant per response shape, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnhancedAvailability {
    /// A specific staff member was requested.
    #[serde(rename_all = "camelCase")]
    Individual {
        date: NaiveDate,
        staff_member: StaffAvailability,
    },
    /// Combined capacity view across all staff at the location.
    #[serde(rename_all = "camelCase")]
    Aggregated {
        aggregated: AggregatedAvailability,
        staff_details: Vec<StaffAvailability>,
    },
    /// Per-staff breakdown, unmerged.
    #[serde(rename_all = "camelCase")]
    Multi {
        date: NaiveDate,
        staff_availabilities: Vec<StaffAvailability>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_slot_wire_shape_is_camel_case() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let slot = AvailabilitySlot {
            start_time: date.and_hms_opt(9, 0, 0).unwrap(),
            end_time: date.and_hms_opt(9, 45, 0).unwrap(),
            available: true,
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["startTime"], "2025-03-14T09:00:00");
        assert_eq!(json["endTime"], "2025-03-14T09:45:00");
        assert_eq!(json["available"], true);
    }

    #[test]
    fn test_enhanced_response_carries_type_discriminant() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let response = EnhancedAvailability::Individual {
            date,
            staff_member: StaffAvailability {
                staff_id: ResourceId::new(Uuid::new_v4()),
                staff_name: "Anna".to_string(),
                slots: vec![],
                available_slots: 0,
                total_slots: 0,
                utilization_rate: 0.0,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "individual");
        assert_eq!(json["staffMember"]["staffName"], "Anna");
    }

    #[test]
    fn test_capacity_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CapacityStatus::Orange).unwrap(),
            "\"orange\""
        );
    }
}
