//! In-memory repository implementation.
//!
//! Backs unit/integration tests and local development runs. Tables are plain
//! vectors behind `RwLock`s; query methods replicate the predicate semantics
//! of the production store (status filtering, day-window containment,
//! resource-set narrowing) so the service layer behaves identically on both.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::super::repository::{
    CalendarRepository, CatalogRepository, FullRepository, RepositoryResult,
};
use crate::models::time::DayWindow;
use crate::models::{
    Block, Booking, Location, LocationId, Offering, OfferingId, Resource, ResourceId, ResourceType,
    Schedule,
};

/// In-memory store with programmatic seeding.
///
/// Rows are returned in insertion order, matching the stored-order contract
/// of the schedule query.
#[derive(Debug, Default)]
pub struct LocalRepository {
    offerings: RwLock<Vec<Offering>>,
    locations: RwLock<Vec<Location>>,
    resources: RwLock<Vec<Resource>>,
    schedules: RwLock<Vec<Schedule>>,
    bookings: RwLock<Vec<Booking>>,
    blocks: RwLock<Vec<Block>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_offering(&self, offering: Offering) {
        self.offerings.write().push(offering);
    }

    pub fn insert_location(&self, location: Location) {
        self.locations.write().push(location);
    }

    pub fn insert_resource(&self, resource: Resource) {
        self.resources.write().push(resource);
    }

    pub fn insert_schedule(&self, schedule: Schedule) {
        self.schedules.write().push(schedule);
    }

    pub fn insert_booking(&self, booking: Booking) {
        self.bookings.write().push(booking);
    }

    pub fn insert_block(&self, block: Block) {
        self.blocks.write().push(block);
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn fetch_offering(&self, id: OfferingId) -> RepositoryResult<Option<Offering>> {
        Ok(self.offerings.read().iter().find(|o| o.id == id).cloned())
    }

    async fn fetch_location(&self, id: LocationId) -> RepositoryResult<Option<Location>> {
        Ok(self.locations.read().iter().find(|l| l.id == id).cloned())
    }

    async fn fetch_active_staff(
        &self,
        location_id: LocationId,
        staff_id: Option<ResourceId>,
    ) -> RepositoryResult<Vec<Resource>> {
        let staff = self
            .resources
            .read()
            .iter()
            .filter(|r| {
                r.location_id == location_id
                    && r.resource_type == ResourceType::Staff
                    && r.is_active
                    && staff_id.map_or(true, |id| r.id == id)
            })
            .cloned()
            .collect();
        Ok(staff)
    }
}

#[async_trait]
impl CalendarRepository for LocalRepository {
    async fn fetch_schedules(
        &self,
        location_id: LocationId,
        day_of_week: u8,
        resource_ids: Option<&[ResourceId]>,
    ) -> RepositoryResult<Vec<Schedule>> {
        let rows = self
            .schedules
            .read()
            .iter()
            .filter(|s| {
                s.location_id == location_id
                    && s.day_of_week == day_of_week
                    && s.is_active
                    && resource_ids.map_or(true, |ids| ids.contains(&s.resource_id))
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn fetch_bookings(
        &self,
        location_id: LocationId,
        offering_id: OfferingId,
        window: &DayWindow,
        resource_ids: Option<&[ResourceId]>,
    ) -> RepositoryResult<Vec<Booking>> {
        let rows = self
            .bookings
            .read()
            .iter()
            .filter(|b| {
                b.location_id == location_id
                    && b.offering_id == Some(offering_id)
                    && b.status.obstructs()
                    && window.contains(b.start_time, b.end_time)
                    && resource_ids
                        .map_or(true, |ids| b.resource_id.is_some_and(|id| ids.contains(&id)))
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn fetch_blocks(
        &self,
        window: &DayWindow,
        location_id: Option<LocationId>,
    ) -> RepositoryResult<Vec<Block>> {
        let rows = self
            .blocks
            .read()
            .iter()
            .filter(|b| {
                window.contains(b.start_time, b.end_time)
                    && location_id.map_or(true, |id| b.location_id == id)
            })
            .cloned()
            .collect();
        Ok(rows)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, OrganizationId};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn seeded() -> (LocalRepository, LocationId, OfferingId) {
        let repo = LocalRepository::new();
        let org = OrganizationId::new(Uuid::new_v4());
        let location = LocationId::new(Uuid::new_v4());
        let offering = OfferingId::new(Uuid::new_v4());

        repo.insert_location(Location {
            id: location,
            organization_id: org,
            name: "Mitte".to_string(),
            timezone: "Europe/Berlin".to_string(),
        });
        repo.insert_offering(Offering {
            id: offering,
            organization_id: org,
            location_id: location,
            name: "Haircut".to_string(),
            duration_minutes: 45,
            is_active: true,
        });
        (repo, location, offering)
    }

    #[tokio::test]
    async fn test_fetch_offering_by_id() {
        let (repo, _, offering) = seeded();
        assert!(repo.fetch_offering(offering).await.unwrap().is_some());
        assert!(repo
            .fetch_offering(OfferingId::new(Uuid::new_v4()))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_bookings_filtered_by_status_and_window() {
        let (repo, location, offering) = seeded();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let window = DayWindow::for_date(date);

        let base = Booking {
            id: Uuid::new_v4(),
            location_id: location,
            offering_id: Some(offering),
            resource_id: None,
            start_time: date.and_hms_opt(10, 0, 0).unwrap(),
            end_time: date.and_hms_opt(10, 45, 0).unwrap(),
            status: BookingStatus::Confirmed,
        };
        repo.insert_booking(base.clone());
        repo.insert_booking(Booking {
            id: Uuid::new_v4(),
            status: BookingStatus::Cancelled,
            ..base.clone()
        });
        // Spans midnight into the requested day; not contained in the window
        repo.insert_booking(Booking {
            id: Uuid::new_v4(),
            start_time: date.pred_opt().unwrap().and_hms_opt(23, 0, 0).unwrap(),
            end_time: date.and_hms_opt(0, 30, 0).unwrap(),
            ..base.clone()
        });

        let rows = repo
            .fetch_bookings(location, offering, &window, None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, base.id);
    }

    #[tokio::test]
    async fn test_staff_lookup_excludes_inactive_and_non_staff() {
        let (repo, location, _) = seeded();
        let org = OrganizationId::new(Uuid::new_v4());
        let active = ResourceId::new(Uuid::new_v4());

        repo.insert_resource(Resource {
            id: active,
            organization_id: org,
            location_id: location,
            name: "Anna".to_string(),
            resource_type: ResourceType::Staff,
            capacity: 1,
            is_active: true,
        });
        repo.insert_resource(Resource {
            id: ResourceId::new(Uuid::new_v4()),
            organization_id: org,
            location_id: location,
            name: "Ben".to_string(),
            resource_type: ResourceType::Staff,
            capacity: 1,
            is_active: false,
        });
        repo.insert_resource(Resource {
            id: ResourceId::new(Uuid::new_v4()),
            organization_id: org,
            location_id: location,
            name: "Room 1".to_string(),
            resource_type: ResourceType::Room,
            capacity: 4,
            is_active: true,
        });

        let staff = repo.fetch_active_staff(location, None).await.unwrap();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].id, active);
    }
}
