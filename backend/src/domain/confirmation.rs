//! Confirmation sinks: where completed bookings go.

use async_trait::async_trait;
use log::{error, info};

use crate::domain::errors::SubmissionError;
use crate::domain::models::DomainBooking;
use crate::domain::my_bookings_service::MyBookingsService;

/// Receives a completed booking. A failure leaves the wizard at its final
/// stage so the user can retry without re-entering selections.
#[async_trait]
pub trait ConfirmationSink: Send + Sync {
    async fn submit(&self, booking: &DomainBooking) -> Result<(), SubmissionError>;
}

/// Acknowledges bookings by logging them and nothing else
#[derive(Debug, Clone, Default)]
pub struct LoggingConfirmationSink;

#[async_trait]
impl ConfirmationSink for LoggingConfirmationSink {
    async fn submit(&self, booking: &DomainBooking) -> Result<(), SubmissionError> {
        info!(
            "📅 Booking confirmed: provider {} on {} at {} ({} min, ${:.2})",
            booking.provider_id, booking.date, booking.time, booking.duration_minutes, booking.price
        );
        Ok(())
    }
}

/// Stores confirmed bookings on the "My Bookings" list
#[derive(Clone)]
pub struct RecordingConfirmationSink {
    my_bookings_service: MyBookingsService,
}

impl RecordingConfirmationSink {
    pub fn new(my_bookings_service: MyBookingsService) -> Self {
        Self { my_bookings_service }
    }
}

#[async_trait]
impl ConfirmationSink for RecordingConfirmationSink {
    async fn submit(&self, booking: &DomainBooking) -> Result<(), SubmissionError> {
        match self.my_bookings_service.record_booking(booking).await {
            Ok(record) => {
                info!("📅 Booking {} recorded for provider {}", record.id, booking.provider_id);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to record booking: {}", e);
                Err(SubmissionError::new(e.to_string()))
            }
        }
    }
}
