//! Domain model types shared across the availability engine.
//!
//! These are the read-only rows the engine consumes from the store. They are
//! fetched fresh on every request; the engine keeps no cache and no mutable
//! state between calls.

pub mod time;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organization identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

/// Location identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

/// Offering identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferingId(pub Uuid);

/// Resource identifier (staff members are resources with type `staff`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

macro_rules! impl_uuid_id {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn new(value: Uuid) -> Self {
                    $name(value)
                }

                pub fn value(&self) -> Uuid {
                    self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<Uuid> for $name {
                fn from(value: Uuid) -> Self {
                    $name(value)
                }
            }
        )+
    };
}

impl_uuid_id!(OrganizationId, LocationId, OfferingId, ResourceId);

/// A bookable service with a default duration.
///
/// The duration seeds the slot length; callers may override it per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: OfferingId,
    pub organization_id: OrganizationId,
    pub location_id: LocationId,
    pub name: String,
    pub duration_minutes: i64,
    pub is_active: bool,
}

/// A branch of an organization.
///
/// The stored IANA timezone anchors nothing in slot arithmetic today; all
/// slot math runs in naive wall-clock time. The field is carried so a
/// timezone-aware mode can be added without a schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub timezone: String,
}

/// Kind of bookable unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Staff,
    Table,
    Room,
    Equipment,
}

/// A bookable unit with its own weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub organization_id: OrganizationId,
    pub location_id: LocationId,
    pub name: String,
    pub resource_type: ResourceType,
    pub capacity: i32,
    pub is_active: bool,
}

/// A recurring weekly working-hours window for one resource on one weekday.
///
/// `day_of_week` is 0-6 with 0 = Sunday. A resource may carry several rows
/// per weekday (split shifts); each row independently seeds a run of slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub resource_id: ResourceId,
    pub location_id: LocationId,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

/// Lifecycle state of a booking. Only `Pending` and `Confirmed` bookings
/// obstruct availability.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// Whether a booking in this state blocks a candidate slot.
    pub fn obstructs(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// An existing customer reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub location_id: LocationId,
    pub offering_id: Option<OfferingId>,
    pub resource_id: Option<ResourceId>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
}

/// An ad-hoc unavailability window (holiday, break, maintenance).
///
/// A block with `resource_id = None` applies to every resource at the
/// location. Blocks obstruct regardless of any status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub location_id: LocationId,
    pub resource_id: Option<ResourceId>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}
