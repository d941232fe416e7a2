//! Integration tests for the basic (location-wide) availability path.

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use termin_rust::db::repositories::LocalRepository;
use termin_rust::models::{
    Block, Booking, BookingStatus, Location, LocationId, Offering, OfferingId, OrganizationId,
    ResourceId, Schedule,
};
use termin_rust::services::{location_availability, AvailabilityError, AvailabilityQuery};

// 2025-03-14 is a Friday (weekday index 5)
fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

struct Fixture {
    repo: LocalRepository,
    location_id: LocationId,
    offering_id: OfferingId,
}

fn fixture() -> Fixture {
    let repo = LocalRepository::new();
    let org = OrganizationId::new(Uuid::new_v4());
    let location_id = LocationId::new(Uuid::new_v4());
    let offering_id = OfferingId::new(Uuid::new_v4());

    repo.insert_location(Location {
        id: location_id,
        organization_id: org,
        name: "Mitte".to_string(),
        timezone: "Europe/Berlin".to_string(),
    });
    repo.insert_offering(Offering {
        id: offering_id,
        organization_id: org,
        location_id,
        name: "Haircut".to_string(),
        duration_minutes: 45,
        is_active: true,
    });

    Fixture {
        repo,
        location_id,
        offering_id,
    }
}

impl Fixture {
    fn add_schedule(&self, start: (u32, u32), end: (u32, u32)) {
        self.repo.insert_schedule(Schedule {
            id: Uuid::new_v4(),
            resource_id: ResourceId::new(Uuid::new_v4()),
            location_id: self.location_id,
            day_of_week: 5,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            is_active: true,
        });
    }

    fn add_booking(&self, start: (u32, u32), end: (u32, u32), status: BookingStatus) {
        self.repo.insert_booking(Booking {
            id: Uuid::new_v4(),
            location_id: self.location_id,
            offering_id: Some(self.offering_id),
            resource_id: None,
            start_time: test_date().and_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: test_date().and_hms_opt(end.0, end.1, 0).unwrap(),
            status,
        });
    }

    fn query(&self) -> AvailabilityQuery {
        AvailabilityQuery {
            location_id: self.location_id,
            offering_id: self.offering_id,
            date: test_date(),
            duration: None,
        }
    }
}

#[tokio::test]
async fn forty_five_minute_offering_over_a_morning_shift() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();

    let starts: Vec<String> = slots
        .iter()
        .map(|s| s.start_time.format("%H:%M").to_string())
        .collect();
    assert_eq!(starts, vec!["09:00", "09:30", "10:00", "10:30", "11:00"]);
    assert!(slots.iter().all(|s| s.available));
    assert!(slots
        .iter()
        .all(|s| s.end_time - s.start_time == Duration::minutes(45)));
}

#[tokio::test]
async fn duration_override_allows_a_slot_ending_on_the_boundary() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));

    let mut query = fx.query();
    query.duration = Some(30);
    let slots = location_availability(&fx.repo, &query).await.unwrap();

    let last = slots.last().unwrap();
    assert_eq!(last.start_time.format("%H:%M").to_string(), "11:30");
    assert_eq!(last.end_time.format("%H:%M").to_string(), "12:00");
}

#[tokio::test]
async fn booking_conflicts_flip_overlapping_slots() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));
    fx.add_booking((10, 0), (10, 45), BookingStatus::Confirmed);

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();

    let availability: Vec<(String, bool)> = slots
        .iter()
        .map(|s| (s.start_time.format("%H:%M").to_string(), s.available))
        .collect();
    assert_eq!(
        availability,
        vec![
            ("09:00".to_string(), true),
            ("09:30".to_string(), false),
            ("10:00".to_string(), false),
            ("10:30".to_string(), false),
            ("11:00".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn cancelled_and_completed_bookings_do_not_obstruct() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));
    fx.add_booking((9, 0), (12, 0), BookingStatus::Cancelled);
    fx.add_booking((9, 0), (12, 0), BookingStatus::Completed);
    fx.add_booking((9, 0), (12, 0), BookingStatus::NoShow);

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();
    assert!(slots.iter().all(|s| s.available));
}

#[tokio::test]
async fn bookings_of_other_offerings_do_not_obstruct() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));
    fx.repo.insert_booking(Booking {
        id: Uuid::new_v4(),
        location_id: fx.location_id,
        offering_id: Some(OfferingId::new(Uuid::new_v4())),
        resource_id: None,
        start_time: test_date().and_hms_opt(9, 0, 0).unwrap(),
        end_time: test_date().and_hms_opt(12, 0, 0).unwrap(),
        status: BookingStatus::Confirmed,
    });

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();
    assert!(slots.iter().all(|s| s.available));
}

#[tokio::test]
async fn blocks_obstruct_but_only_at_this_location() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));
    fx.repo.insert_block(Block {
        id: Uuid::new_v4(),
        location_id: fx.location_id,
        resource_id: None,
        start_time: test_date().and_hms_opt(11, 0, 0).unwrap(),
        end_time: test_date().and_hms_opt(12, 0, 0).unwrap(),
    });
    // Same window, different location: filtered out by the basic-path query
    fx.repo.insert_block(Block {
        id: Uuid::new_v4(),
        location_id: LocationId::new(Uuid::new_v4()),
        resource_id: None,
        start_time: test_date().and_hms_opt(9, 0, 0).unwrap(),
        end_time: test_date().and_hms_opt(10, 0, 0).unwrap(),
    });

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();

    let by_start = |h: u32, m: u32| {
        slots
            .iter()
            .find(|s| s.start_time == test_date().and_hms_opt(h, m, 0).unwrap())
            .unwrap()
    };
    assert!(by_start(9, 0).available);
    assert!(by_start(10, 0).available);
    assert!(!by_start(10, 30).available); // ends 11:15, inside the block
    assert!(!by_start(11, 0).available);
}

#[tokio::test]
async fn no_schedule_rows_is_an_empty_result_not_an_error() {
    let fx = fixture();
    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn unknown_offering_is_not_found() {
    let fx = fixture();
    let mut query = fx.query();
    query.offering_id = OfferingId::new(Uuid::new_v4());

    let err = location_availability(&fx.repo, &query).await.unwrap_err();
    assert!(matches!(err, AvailabilityError::OfferingNotFound));
}

#[tokio::test]
async fn unknown_location_is_not_found() {
    let fx = fixture();
    let mut query = fx.query();
    query.location_id = LocationId::new(Uuid::new_v4());

    let err = location_availability(&fx.repo, &query).await.unwrap_err();
    assert!(matches!(err, AvailabilityError::LocationNotFound));
}

#[tokio::test]
async fn repeated_queries_yield_identical_results() {
    let fx = fixture();
    fx.add_schedule((9, 0), (12, 0));
    fx.add_booking((10, 0), (10, 45), BookingStatus::Pending);

    let first = location_availability(&fx.repo, &fx.query()).await.unwrap();
    let second = location_availability(&fx.repo, &fx.query()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn split_shift_rows_emit_slots_in_row_order() {
    let fx = fixture();
    fx.add_schedule((14, 0), (16, 0));
    fx.add_schedule((9, 0), (10, 30));

    let slots = location_availability(&fx.repo, &fx.query()).await.unwrap();
    let starts: Vec<String> = slots
        .iter()
        .map(|s| s.start_time.format("%H:%M").to_string())
        .collect();
    // afternoon row was inserted first, so its run comes first
    assert_eq!(starts, vec!["14:00", "14:30", "15:00", "09:00", "09:30"]);
}
