use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::slot::{hhmm, minute_of_day};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub barber_id: String,
    pub services: Vec<String>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub status: BookingStatus,
}

impl Booking {
    pub fn start_minute(&self) -> u32 {
        minute_of_day(&self.time)
    }

    pub fn end_minute(&self) -> u32 {
        self.start_minute().saturating_add(self.duration_minutes)
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Canceled
    }

    /// Whether `minute` falls in `[start, start + duration)`.
    pub fn covers(&self, minute: u32) -> bool {
        minute >= self.start_minute() && minute < self.end_minute()
    }

    /// Half-open interval overlap on the same barber and day.
    pub fn overlaps(&self, other: &Booking) -> bool {
        self.barber_id == other.barber_id
            && self.date == other.date
            && self.start_minute() < other.end_minute()
            && other.start_minute() < self.end_minute()
    }

    pub fn apply(&mut self, update: &BookingUpdate) {
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Uncertain,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Uncertain => "uncertain",
            BookingStatus::Canceled => "canceled",
        }
    }
}

/// Fields merged into an existing booking. Only status changes are in scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
}

impl BookingUpdate {
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
        }
    }
}
