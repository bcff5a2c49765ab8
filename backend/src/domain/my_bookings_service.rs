//! "My Bookings" service: past and upcoming sessions with editable notes.

use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use log::info;
use shared::BookingStatus;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::availability::Clock;
use crate::domain::catalog::ProviderDirectory;
use crate::domain::errors::RecordError;
use crate::domain::favorites_service::validate_note;
use crate::domain::models::{DomainBooking, DomainBookingRecord, SESSION_DURATION_MINUTES};
use crate::storage::BookingRepository;

/// (provider id, days from today, (hour, minute), note)
const BOOKING_SEEDS: &[(u32, i64, (u32, u32), &str)] = &[
    (102, -9, (10, 0), "Worked on a morning routine chart"),
    (201, 3, (14, 0), ""),
    (303, 6, (11, 30), "Bring this week's spelling list"),
];

/// A stored booking with its status relative to today
#[derive(Debug, Clone, PartialEq)]
pub struct BookingEntry {
    pub record: DomainBookingRecord,
    pub status: BookingStatus,
}

#[derive(Clone)]
pub struct MyBookingsService {
    repository: BookingRepository,
    directory: Arc<ProviderDirectory>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl MyBookingsService {
    pub fn new(repository: BookingRepository, directory: Arc<ProviderDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            directory,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Bookings matching `query` (provider name or note, case-insensitive)
    /// and `status`, ordered by date then time
    pub async fn list_bookings(&self, query: Option<&str>, status: Option<BookingStatus>) -> Result<Vec<BookingEntry>> {
        let today = self.clock.today();
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let records = {
            let _guard = self.write_lock.lock().await;
            self.load_or_seed().await?
        };

        let mut entries: Vec<BookingEntry> = records
            .into_iter()
            .map(|record| BookingEntry {
                status: record.status_on(today),
                record,
            })
            .filter(|entry| status.map_or(true, |wanted| entry.status == wanted))
            .filter(|entry| match &needle {
                Some(needle) => {
                    entry.record.provider_name.to_lowercase().contains(needle.as_str())
                        || entry.record.note.to_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .collect();

        entries.sort_by_key(|entry| (entry.record.booking.date, entry.record.booking.time));
        Ok(entries)
    }

    /// Store a booking that just came out of the wizard
    pub async fn record_booking(&self, booking: &DomainBooking) -> Result<DomainBookingRecord> {
        let provider = self
            .directory
            .find(booking.provider_id)
            .ok_or_else(|| RecordError::NotFound(format!("Provider {}", booking.provider_id)))?;

        let record = DomainBookingRecord {
            id: DomainBookingRecord::generate_id(),
            booking: booking.clone(),
            provider_name: provider.name.clone(),
            specialization: provider.specialization,
            note: String::new(),
            created_at: Utc::now(),
        };

        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_seed().await?;
        records.push(record.clone());
        self.repository.save(&records).await?;

        info!("📅 Recorded booking {} with {}", record.id, record.provider_name);
        Ok(record)
    }

    pub async fn update_note(&self, booking_id: &str, note: String) -> Result<BookingEntry> {
        let note = validate_note(note)?;
        let today = self.clock.today();

        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_seed().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == booking_id)
            .ok_or_else(|| RecordError::NotFound(format!("Booking {}", booking_id)))?;
        record.note = note;
        let updated = record.clone();
        self.repository.save(&records).await?;

        info!("📅 Updated note on booking {}", booking_id);
        Ok(BookingEntry {
            status: updated.status_on(today),
            record: updated,
        })
    }

    pub async fn remove_booking(&self, booking_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_or_seed().await?;
        let before = records.len();
        records.retain(|r| r.id != booking_id);
        if records.len() == before {
            return Err(RecordError::NotFound(format!("Booking {}", booking_id)).into());
        }
        self.repository.save(&records).await?;
        info!("📅 Removed booking {}", booking_id);
        Ok(())
    }

    /// Callers must hold `write_lock`: a first read writes the seed
    async fn load_or_seed(&self) -> Result<Vec<DomainBookingRecord>> {
        if let Some(records) = self.repository.load().await? {
            return Ok(records);
        }

        let today = self.clock.today();
        let mut seeded = Vec::new();
        for (provider_id, day_offset, (hour, minute), note) in BOOKING_SEEDS {
            let (Some(provider), Some(time)) = (
                self.directory.find(*provider_id),
                NaiveTime::from_hms_opt(*hour, *minute, 0),
            ) else {
                continue;
            };
            seeded.push(DomainBookingRecord {
                id: DomainBookingRecord::generate_id(),
                booking: DomainBooking {
                    provider_id: provider.id,
                    date: today + Duration::days(*day_offset),
                    time,
                    duration_minutes: SESSION_DURATION_MINUTES,
                    price: provider.hourly_rate,
                },
                provider_name: provider.name.clone(),
                specialization: provider.specialization,
                note: note.to_string(),
                created_at: Utc::now(),
            });
        }

        self.repository.save(&seeded).await?;
        info!("Seeded {} bookings", seeded.len());
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::FixedClock;
    use crate::domain::confirmation::{ConfirmationSink, RecordingConfirmationSink};
    use crate::storage::test_utils::GatedStorage;
    use crate::storage::{InMemoryKeyValueStorage, KeyValueStorage};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_service() -> (MyBookingsService, Arc<FixedClock>) {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(InMemoryKeyValueStorage::new());
        let clock = Arc::new(FixedClock::new(ymd(2024, 1, 4)));
        let directory = Arc::new(ProviderDirectory::builtin().unwrap());
        let service = MyBookingsService::new(BookingRepository::new(storage), directory, clock.clone());
        (service, clock)
    }

    fn booking_for(provider_id: u32, date: NaiveDate) -> DomainBooking {
        DomainBooking {
            provider_id,
            date,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: SESSION_DURATION_MINUTES,
            price: 70.0,
        }
    }

    #[tokio::test]
    async fn test_seeded_list_is_chronological_with_status() {
        let (service, _clock) = setup_service();

        let entries = service.list_bookings(None, None).await.unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.record.booking.date).collect();
        assert_eq!(dates, vec![ymd(2023, 12, 26), ymd(2024, 1, 7), ymd(2024, 1, 10)]);
        assert_eq!(entries[0].status, BookingStatus::Past);
        assert_eq!(entries[1].status, BookingStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_status_and_query_filters() {
        let (service, _clock) = setup_service();

        let upcoming = service.list_bookings(None, Some(BookingStatus::Upcoming)).await.unwrap();
        assert_eq!(upcoming.len(), 2);
        let past = service.list_bookings(None, Some(BookingStatus::Past)).await.unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].record.provider_name, "Michael Chen");

        let by_note = service.list_bookings(Some("SPELLING"), None).await.unwrap();
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].record.booking.provider_id, 303);

        let none = service.list_bookings(Some("wilson"), Some(BookingStatus::Past)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_status_moves_with_the_clock() {
        let (service, clock) = setup_service();
        clock.set(ymd(2024, 1, 8));
        let past = service.list_bookings(None, Some(BookingStatus::Past)).await.unwrap();
        assert_eq!(past.len(), 2);
    }

    #[tokio::test]
    async fn test_record_booking_resolves_provider() {
        let (service, _clock) = setup_service();

        let record = service.record_booking(&booking_for(201, ymd(2024, 1, 8))).await.unwrap();
        assert_eq!(record.provider_name, "Dr. James Wilson");
        assert_eq!(record.specialization, shared::Specialization::Adhd);

        let entries = service.list_bookings(Some("wilson"), None).await.unwrap();
        assert!(entries.iter().any(|e| e.record.id == record.id));

        let err = service.record_booking(&booking_for(999, ymd(2024, 1, 8))).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<RecordError>(), Some(RecordError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_note_and_remove() {
        let (service, _clock) = setup_service();
        let id = service.list_bookings(None, None).await.unwrap()[1].record.id.clone();

        let entry = service.update_note(&id, "Reschedule if sick".to_string()).await.unwrap();
        assert_eq!(entry.record.note, "Reschedule if sick");

        service.remove_booking(&id).await.unwrap();
        assert_eq!(service.list_bookings(None, None).await.unwrap().len(), 2);

        let err = service.remove_booking(&id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<RecordError>(), Some(RecordError::NotFound(_))));
        assert!(service.update_note("booking::missing", String::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_recording_sink_stores_bookings() {
        let (service, _clock) = setup_service();
        let sink = RecordingConfirmationSink::new(service.clone());

        sink.submit(&booking_for(101, ymd(2024, 1, 8))).await.unwrap();
        let entries = service.list_bookings(Some("sarah"), None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.booking.price, 70.0);

        assert!(sink.submit(&booking_for(999, ymd(2024, 1, 8))).await.is_err());
    }

    #[tokio::test]
    async fn test_first_listing_does_not_overwrite_a_concurrent_booking() {
        let storage = Arc::new(GatedStorage::new());
        let clock = Arc::new(FixedClock::new(ymd(2024, 1, 4)));
        let directory = Arc::new(ProviderDirectory::builtin().unwrap());
        let service = MyBookingsService::new(BookingRepository::new(storage.clone()), directory, clock);

        // The first listing parks while writing the seed
        let listing = {
            let service = service.clone();
            tokio::spawn(async move { service.list_bookings(None, None).await })
        };
        storage.entered.notified().await;

        let recording = {
            let service = service.clone();
            tokio::spawn(async move { service.record_booking(&booking_for(201, ymd(2024, 1, 8))).await })
        };
        tokio::task::yield_now().await;
        storage.release();

        assert_eq!(listing.await.unwrap().unwrap().len(), 3);
        let record = recording.await.unwrap().unwrap();

        let entries = service.list_bookings(None, None).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().any(|e| e.record.id == record.id));
    }
}
