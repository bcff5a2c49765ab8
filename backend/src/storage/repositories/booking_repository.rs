//! # Booking Repository
//!
//! Stores "My Bookings" as one JSON array under the `bookings` key.

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::domain::models::DomainBookingRecord;
use crate::storage::KeyValueStorage;

pub const BOOKINGS_KEY: &str = "bookings";

#[derive(Clone)]
pub struct BookingRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl BookingRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The stored bookings, or `None` if they were never saved
    pub async fn load(&self) -> Result<Option<Vec<DomainBookingRecord>>> {
        match self.storage.get(BOOKINGS_KEY).await? {
            Some(json) => {
                let records = serde_json::from_str(&json).context("Corrupt bookings document")?;
                Ok(Some(records))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, records: &[DomainBookingRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.storage.set(BOOKINGS_KEY, &json).await?;
        debug!("Saved {} bookings", records.len());
        Ok(())
    }
}
