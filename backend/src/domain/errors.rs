//! Error types for the booking flow and the list screens.

use chrono::{NaiveDate, NaiveTime};
use shared::{Specialization, WizardStage};
use uuid::Uuid;

/// A selection that falls outside what the wizard currently offers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Provider {0} is not in this catalog")]
    UnknownProvider(u32),
    #[error("{date} is not an available date for provider {provider_id}")]
    DateNotAvailable { provider_id: u32, date: NaiveDate },
    #[error("{0} is not a bookable time slot")]
    TimeNotAvailable(NaiveTime),
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    MalformedDate(String),
    #[error("'{0}' is not a valid time (expected HH:MM)")]
    MalformedTime(String),
    #[error("Complete the {required} step first (wizard is at {current})")]
    StageNotReached {
        required: WizardStage,
        current: WizardStage,
    },
}

/// The confirmation sink rejected a booking
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Booking confirmation failed: {reason}")]
pub struct SubmissionError {
    pub reason: String,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("Booking is not ready to confirm (stage {stage} of 4)")]
    NotReady { stage: u8 },
    #[error("A confirmation for this booking is already in progress")]
    SubmissionInFlight,
    #[error("No confirmation is in progress")]
    NoSubmissionInFlight,
    #[error("Wizard session {0} not found")]
    SessionNotFound(Uuid),
    #[error("No providers are listed for {0}")]
    CatalogUnavailable(Specialization),
}

/// Failures of the favorites and "My Bookings" list operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("Note cannot exceed {max} characters")]
    NoteTooLong { max: usize },
}
