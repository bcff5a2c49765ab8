//! Domain models for confirmed bookings and the "My Bookings" list.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{BookingStatus, Specialization};

/// Every session is booked for one hour
pub const SESSION_DURATION_MINUTES: u32 = 60;

/// The record a completed wizard hands to the confirmation sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBooking {
    pub provider_id: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub price: f64,
}

/// A stored booking as listed on the "My Bookings" screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBookingRecord {
    pub id: String,
    pub booking: DomainBooking,
    pub provider_name: String,
    pub specialization: Specialization,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl DomainBookingRecord {
    pub fn generate_id() -> String {
        format!("booking::{}", uuid::Uuid::new_v4())
    }

    /// Bookings dated today still count as upcoming
    pub fn status_on(&self, today: NaiveDate) -> BookingStatus {
        if self.booking.date >= today {
            BookingStatus::Upcoming
        } else {
            BookingStatus::Past
        }
    }
}
