//! Repository trait definitions for the availability engine.
//!
//! The relational store is an external collaborator; these traits are the
//! whole surface the engine consumes. Implementations must be `Send + Sync`
//! to work with async Rust. The engine only reads — no write interface
//! exists here (booking creation and its conflict check happen in the store,
//! outside this crate).

pub mod error;

use async_trait::async_trait;

use crate::models::time::DayWindow;
use crate::models::{
    Block, Booking, Location, LocationId, Offering, OfferingId, Resource, ResourceId, Schedule,
};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Lookups of the catalog entities availability requests are anchored on.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch an offering by id.
    async fn fetch_offering(&self, id: OfferingId) -> RepositoryResult<Option<Offering>>;

    /// Fetch a location by id.
    async fn fetch_location(&self, id: LocationId) -> RepositoryResult<Option<Location>>;

    /// Fetch the active staff resources at a location, optionally narrowed
    /// to a single id. Inactive resources and non-staff types never match;
    /// a staff id belonging to another location yields an empty list.
    async fn fetch_active_staff(
        &self,
        location_id: LocationId,
        staff_id: Option<ResourceId>,
    ) -> RepositoryResult<Vec<Resource>>;
}

/// Queries over the calendar rows an availability computation consumes.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Active schedule rows for a location on one weekday (0 = Sunday), in
    /// stored order. `resource_ids` narrows to a resource set when given;
    /// the basic path passes `None` and pools the whole location.
    async fn fetch_schedules(
        &self,
        location_id: LocationId,
        day_of_week: u8,
        resource_ids: Option<&[ResourceId]>,
    ) -> RepositoryResult<Vec<Schedule>>;

    /// Bookings with status pending or confirmed, for the location and
    /// offering, fully contained in the day window. `resource_ids` narrows
    /// to a resource set when given.
    async fn fetch_bookings(
        &self,
        location_id: LocationId,
        offering_id: OfferingId,
        window: &DayWindow,
        resource_ids: Option<&[ResourceId]>,
    ) -> RepositoryResult<Vec<Booking>>;

    /// Blocks fully contained in the day window. The basic path filters by
    /// location; the staff path queries all blocks in the window.
    async fn fetch_blocks(
        &self,
        window: &DayWindow,
        location_id: Option<LocationId>,
    ) -> RepositoryResult<Vec<Block>>;
}

/// The complete store surface the availability engine needs.
#[async_trait]
pub trait FullRepository: CatalogRepository + CalendarRepository {
    /// Probe whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
