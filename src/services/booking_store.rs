use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDateTime, Utc};

use crate::db::KvStore;
use crate::errors::AppError;
use crate::models::{Booking, BookingDetails, BookingQuery, BookingStatus, NewBooking};
use crate::services::id_gen::IdGenerator;
use crate::services::lifecycle::{self, TransitionPolicy};

/// Slot holding the whole booking collection as a JSON array.
pub const BOOKINGS_SLOT: &str = "bookings";

/// Sole authority over the booking collection.
///
/// No operation deletes a single booking; [`BookingStore::clear`] wipes the
/// whole collection and exists for administration and tests.
pub trait BookingStore: Send + Sync {
    fn list_all(&self, query: &BookingQuery) -> Result<Vec<Booking>, AppError>;
    fn get_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    fn create(&self, new: NewBooking) -> Result<Booking, AppError>;
    fn update_details(&self, id: &str, details: BookingDetails) -> Result<Booking, AppError>;
    fn approve(&self, id: &str) -> Result<Booking, AppError>;
    fn reject(&self, id: &str, reason: &str) -> Result<Booking, AppError>;
    fn cancel(&self, id: &str) -> Result<Booking, AppError>;
    fn start_trip(&self, id: &str) -> Result<Booking, AppError>;
    fn complete(&self, id: &str) -> Result<Booking, AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// Keeps the collection in a single key-value slot. Every call loads the full
/// collection and every mutation writes it back whole.
///
/// Mutations are serialized within this process. Two processes writing the
/// same backing file can still overwrite each other's changes.
pub struct KvBookingStore<K: KvStore> {
    kv: K,
    ids: Box<dyn IdGenerator>,
    policy: TransitionPolicy,
    write_lock: Mutex<()>,
}

impl<K: KvStore> KvBookingStore<K> {
    pub fn new(kv: K, ids: Box<dyn IdGenerator>, policy: TransitionPolicy) -> Self {
        Self {
            kv,
            ids,
            policy,
            write_lock: Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Vec<Booking>, AppError> {
        let Some(raw) = self.kv.get(BOOKINGS_SLOT)? else {
            return Ok(vec![]);
        };

        match serde_json::from_str(&raw) {
            Ok(bookings) => Ok(bookings),
            Err(e) => {
                tracing::warn!(error = %e, "stored bookings are unreadable, treating collection as empty");
                Ok(vec![])
            }
        }
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), AppError> {
        let raw = serde_json::to_string(bookings)?;
        self.kv.put(BOOKINGS_SLOT, &raw)
    }

    /// Loads, locates `id`, lets `mutate` change the record and writes the
    /// collection back. Nothing is written if `mutate` fails.
    fn modify<F>(&self, id: &str, mutate: F) -> Result<Booking, AppError>
    where
        F: FnOnce(&mut Booking, NaiveDateTime) -> Result<(), AppError>,
    {
        let _guard = self.lock_writes();
        let mut bookings = self.load()?;

        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        mutate(booking, now())?;
        let updated = booking.clone();

        self.save(&bookings)?;
        Ok(updated)
    }

    fn transition(
        &self,
        id: &str,
        to: BookingStatus,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let policy = self.policy;
        self.modify(id, |booking, now| {
            lifecycle::check(policy, booking, to)?;
            let from = booking.status;
            lifecycle::apply(booking, to, reason, now);
            tracing::info!(booking_id = %booking.id, %from, %to, "booking status changed");
            Ok(())
        })
    }
}

impl<K: KvStore> BookingStore for KvBookingStore<K> {
    fn list_all(&self, query: &BookingQuery) -> Result<Vec<Booking>, AppError> {
        let bookings = self.load()?;
        Ok(bookings.into_iter().filter(|b| query.matches(b)).collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        Ok(self.load()?.into_iter().find(|b| b.id == id))
    }

    fn create(&self, new: NewBooking) -> Result<Booking, AppError> {
        lifecycle::validate_window(new.start_time, new.end_time)?;

        let _guard = self.lock_writes();
        let mut bookings = self.load()?;

        let id = match new.id {
            Some(id) if id.trim().is_empty() => {
                return Err(AppError::Validation("booking id cannot be blank".to_string()));
            }
            Some(id) => id,
            None => self.ids.next_id(&bookings)?,
        };

        if bookings.iter().any(|b| b.id == id) {
            return Err(AppError::DuplicateId(id));
        }

        let now = now();
        let booking = Booking {
            id,
            requester_id: new.requester_id,
            purpose: new.purpose,
            status: BookingStatus::Pending,
            start_time: new.start_time,
            end_time: new.end_time,
            vehicle_id: new.vehicle_id,
            vehicle_type: new.vehicle_type,
            pickup_location: new.pickup_location,
            dropoff_location: new.dropoff_location,
            passenger_count: new.passenger_count,
            reject_reason: None,
            created_at: now,
            updated_at: now,
        };

        bookings.push(booking.clone());
        self.save(&bookings)?;

        tracing::info!(booking_id = %booking.id, requester_id = booking.requester_id, "booking created");
        Ok(booking)
    }

    fn update_details(&self, id: &str, details: BookingDetails) -> Result<Booking, AppError> {
        let policy = self.policy;
        self.modify(id, |booking, now| {
            if policy == TransitionPolicy::Strict && booking.status != BookingStatus::Pending {
                return Err(AppError::Validation(format!(
                    "booking {} is {} and can no longer be edited",
                    booking.id, booking.status
                )));
            }

            let start = details.start_time.unwrap_or(booking.start_time);
            let end = details.end_time.unwrap_or(booking.end_time);
            lifecycle::validate_window(start, end)?;

            booking.start_time = start;
            booking.end_time = end;
            if let Some(purpose) = details.purpose {
                booking.purpose = purpose;
            }
            if let Some(vehicle_id) = details.vehicle_id {
                booking.vehicle_id = Some(vehicle_id);
            }
            if let Some(vehicle_type) = details.vehicle_type {
                booking.vehicle_type = Some(vehicle_type);
            }
            if let Some(pickup) = details.pickup_location {
                booking.pickup_location = Some(pickup);
            }
            if let Some(dropoff) = details.dropoff_location {
                booking.dropoff_location = Some(dropoff);
            }
            if let Some(count) = details.passenger_count {
                booking.passenger_count = Some(count);
            }
            booking.updated_at = now;

            tracing::info!(booking_id = %booking.id, "booking details updated");
            Ok(())
        })
    }

    fn approve(&self, id: &str) -> Result<Booking, AppError> {
        self.transition(id, BookingStatus::Approved, None)
    }

    fn reject(&self, id: &str, reason: &str) -> Result<Booking, AppError> {
        let reason = lifecycle::validate_reason(reason)?;
        self.transition(id, BookingStatus::Rejected, Some(reason))
    }

    fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        self.transition(id, BookingStatus::Canceled, None)
    }

    fn start_trip(&self, id: &str) -> Result<Booking, AppError> {
        self.transition(id, BookingStatus::InProgress, None)
    }

    fn complete(&self, id: &str) -> Result<Booking, AppError> {
        self.transition(id, BookingStatus::Completed, None)
    }

    fn clear(&self) -> Result<(), AppError> {
        let _guard = self.lock_writes();
        self.kv.remove(BOOKINGS_SLOT)?;
        tracing::info!("booking collection cleared");
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
