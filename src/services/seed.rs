use crate::errors::AppError;
use crate::models::booking::local_datetime;
use crate::models::{BookingQuery, NewBooking};
use crate::services::booking_store::BookingStore;

struct Fixture {
    requester_id: i64,
    purpose: &'static str,
    start: &'static str,
    end: &'static str,
    vehicle_type: &'static str,
    pickup: &'static str,
    dropoff: &'static str,
    passengers: u32,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        requester_id: 3,
        purpose: "Client Meeting",
        start: "2026-01-20T09:00",
        end: "2026-01-20T14:00",
        vehicle_type: "Sedan",
        pickup: "Head office",
        dropoff: "Riverside Tower",
        passengers: 3,
    },
    Fixture {
        requester_id: 3,
        purpose: "Equipment delivery",
        start: "2026-01-22T07:30",
        end: "2026-01-22T12:00",
        vehicle_type: "Pickup",
        pickup: "Warehouse B",
        dropoff: "North depot",
        passengers: 1,
    },
    Fixture {
        requester_id: 1,
        purpose: "Airport transfer",
        start: "2026-01-25T05:00",
        end: "2026-01-25T08:00",
        vehicle_type: "Van",
        pickup: "Head office",
        dropoff: "International airport",
        passengers: 6,
    },
];

/// Creates the fixture bookings when the collection is empty. Returns how
/// many were created.
pub fn seed_if_empty(store: &dyn BookingStore) -> Result<usize, AppError> {
    if !store.list_all(&BookingQuery::default())?.is_empty() {
        return Ok(0);
    }

    for fixture in FIXTURES {
        let parse = |s: &str| {
            local_datetime::parse(s)
                .ok_or_else(|| AppError::Config(format!("bad fixture timestamp: {s}")))
        };

        store.create(NewBooking {
            id: None,
            requester_id: fixture.requester_id,
            purpose: fixture.purpose.to_string(),
            status: None,
            start_time: parse(fixture.start)?,
            end_time: parse(fixture.end)?,
            vehicle_id: None,
            vehicle_type: Some(fixture.vehicle_type.to_string()),
            pickup_location: Some(fixture.pickup.to_string()),
            dropoff_location: Some(fixture.dropoff.to_string()),
            passenger_count: Some(fixture.passengers),
        })?;
    }

    tracing::info!(count = FIXTURES.len(), "seeded fixture bookings");
    Ok(FIXTURES.len())
}
