pub mod seed;

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus, BookingUpdate};
use crate::services::availability::find_conflict;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("booking {0} not found")]
    NotFound(String),

    #[error("booking id {0} already exists")]
    DuplicateId(String),

    #[error("slot overlaps booking {existing_id}")]
    Conflict { existing_id: String },

    #[error("invalid booking: {0}")]
    Invalid(String),
}

/// In-memory collection of bookings for the lifetime of the process.
#[derive(Debug, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn seeded(today: NaiveDate) -> Self {
        Self::with_bookings(seed::mock_bookings(today))
    }

    /// Appends a new confirmed booking. Rejects duplicate ids and any overlap
    /// with an active booking of the same barber and day.
    pub fn add(&mut self, booking: Booking) -> Result<(), StoreError> {
        validate(&booking)?;

        if self.get(&booking.id).is_some() {
            return Err(StoreError::DuplicateId(booking.id));
        }

        if let Some(existing) = find_conflict(&self.bookings, &booking) {
            tracing::warn!(
                booking_id = %booking.id,
                existing_id = %existing.id,
                barber_id = %booking.barber_id,
                "booking rejected, slot overlaps"
            );
            return Err(StoreError::Conflict {
                existing_id: existing.id.clone(),
            });
        }

        tracing::info!(
            booking_id = %booking.id,
            barber_id = %booking.barber_id,
            date = %booking.date,
            time = %booking.time.format("%H:%M"),
            "booking added"
        );
        self.bookings.push(booking);
        Ok(())
    }

    pub fn update(&mut self, id: &str, update: &BookingUpdate) -> Result<&Booking, StoreError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        booking.apply(update);
        tracing::info!(booking_id = %id, status = booking.status.as_str(), "booking updated");
        Ok(&*booking)
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }
}

fn validate(booking: &Booking) -> Result<(), StoreError> {
    if booking.id.trim().is_empty() {
        return Err(StoreError::Invalid("id is empty".to_string()));
    }
    if booking.barber_id.trim().is_empty() {
        return Err(StoreError::Invalid("barber is missing".to_string()));
    }
    if booking.services.is_empty() {
        return Err(StoreError::Invalid("no services selected".to_string()));
    }
    if booking.duration_minutes == 0 {
        return Err(StoreError::Invalid("duration must be positive".to_string()));
    }
    if booking.status != BookingStatus::Confirmed {
        return Err(StoreError::Invalid(format!(
            "new bookings must be confirmed, got {}",
            booking.status.as_str()
        )));
    }
    Ok(())
}
