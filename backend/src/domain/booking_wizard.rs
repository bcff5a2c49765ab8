//! Booking wizard state machine.
//!
//! One wizard drives a single booking attempt through four stages:
//!
//! ```text
//! Idle --select_provider--> ProviderSelected --select_date--> DateSelected
//!      --select_time--> TimeSelected --confirm--> Idle (booking emitted)
//! ```
//!
//! The selection is held in an enum whose variants only carry the fields
//! earned so far, so a later stage can never be populated while an earlier
//! one is empty. Going back to an earlier step clears every later field.
//!
//! Confirmation is split in two so the sink call can run without holding the
//! wizard: [`BookingWizard::begin_submission`] builds the booking and locks
//! the wizard, [`BookingWizard::finish_submission`] applies the outcome.
//! While a submission is in flight every other transition is rejected.

use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use shared::{Specialization, ThemeToken, WizardStage};
use std::sync::Arc;

use crate::domain::availability::{AvailabilityService, AvailableDate, BookableSlot};
use crate::domain::catalog::ProviderCatalog;
use crate::domain::confirmation::ConfirmationSink;
use crate::domain::errors::{SubmissionError, ValidationError, WizardError};
use crate::domain::models::{DomainBooking, DomainProvider, SESSION_DURATION_MINUTES};

#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Idle,
    ProviderSelected {
        provider: DomainProvider,
    },
    DateSelected {
        provider: DomainProvider,
        date: NaiveDate,
    },
    TimeSelected {
        provider: DomainProvider,
        date: NaiveDate,
        time: NaiveTime,
    },
}

impl Selection {
    fn stage(&self) -> WizardStage {
        match self {
            Selection::Idle => WizardStage::Idle,
            Selection::ProviderSelected { .. } => WizardStage::ProviderSelected,
            Selection::DateSelected { .. } => WizardStage::DateSelected,
            Selection::TimeSelected { .. } => WizardStage::TimeSelected,
        }
    }

    fn provider(&self) -> Option<&DomainProvider> {
        match self {
            Selection::Idle => None,
            Selection::ProviderSelected { provider }
            | Selection::DateSelected { provider, .. }
            | Selection::TimeSelected { provider, .. } => Some(provider),
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        match self {
            Selection::DateSelected { date, .. } | Selection::TimeSelected { date, .. } => Some(*date),
            _ => None,
        }
    }

    fn time(&self) -> Option<NaiveTime> {
        match self {
            Selection::TimeSelected { time, .. } => Some(*time),
            _ => None,
        }
    }
}

/// A single booking attempt against one specialization's catalog
#[derive(Clone)]
pub struct BookingWizard {
    catalog: Arc<ProviderCatalog>,
    theme: ThemeToken,
    availability: AvailabilityService,
    selection: Selection,
    submitting: bool,
}

impl BookingWizard {
    /// Open a wizard over `catalog`, skinned with `theme`
    pub fn new(catalog: Arc<ProviderCatalog>, theme: ThemeToken, availability: AvailabilityService) -> Self {
        Self {
            catalog,
            theme,
            availability,
            selection: Selection::Idle,
            submitting: false,
        }
    }

    /// Open a wizard using the catalog's own theme
    pub fn for_catalog(catalog: Arc<ProviderCatalog>, availability: AvailabilityService) -> Self {
        let theme = catalog.theme().clone();
        Self::new(catalog, theme, availability)
    }

    pub fn specialization(&self) -> Specialization {
        self.catalog.specialization()
    }

    pub fn theme(&self) -> &ThemeToken {
        &self.theme
    }

    pub fn stage(&self) -> WizardStage {
        self.selection.stage()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn selected_provider(&self) -> Option<&DomainProvider> {
        self.selection.provider()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selection.date()
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selection.time()
    }

    /// Dates bookable with the selected provider, recomputed from today
    pub fn available_dates(&self) -> Vec<AvailableDate> {
        self.selection
            .provider()
            .map(|provider| self.availability.available_dates(provider))
            .unwrap_or_default()
    }

    /// Slots offered once a date has been chosen
    pub fn available_time_slots(&self) -> Vec<BookableSlot> {
        if self.stage() >= WizardStage::DateSelected {
            self.availability.available_time_slots()
        } else {
            Vec::new()
        }
    }

    /// Choose a provider. Picking a different provider discards any chosen
    /// date and time; re-picking the current one keeps them.
    pub fn select_provider(&mut self, provider_id: u32) -> Result<WizardStage, WizardError> {
        self.ensure_idle_submission()?;

        let provider = match self.catalog.find(provider_id) {
            Some(provider) => provider.clone(),
            None => {
                warn!("Rejected unknown provider {} for {} wizard", provider_id, self.specialization());
                return Err(ValidationError::UnknownProvider(provider_id).into());
            }
        };

        if self.selection.provider().map(|p| p.id) == Some(provider_id) {
            return Ok(self.stage());
        }

        info!("Wizard provider selected: {} ({})", provider.name, provider.id);
        self.selection = Selection::ProviderSelected { provider };
        Ok(self.stage())
    }

    /// Choose a date from the selected provider's available dates. Picking a
    /// different date discards the chosen time.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<WizardStage, WizardError> {
        self.ensure_idle_submission()?;

        let provider = match self.selection.provider() {
            Some(provider) => provider.clone(),
            None => {
                return Err(ValidationError::StageNotReached {
                    required: WizardStage::ProviderSelected,
                    current: self.stage(),
                }
                .into())
            }
        };

        if !self.availability.is_date_available(&provider, date) {
            warn!("Rejected date {} for provider {}", date, provider.id);
            return Err(ValidationError::DateNotAvailable {
                provider_id: provider.id,
                date,
            }
            .into());
        }

        if self.selection.date() == Some(date) {
            return Ok(self.stage());
        }

        self.selection = Selection::DateSelected { provider, date };
        Ok(self.stage())
    }

    /// Choose a time from the fixed slot grid
    pub fn select_time(&mut self, time: NaiveTime) -> Result<WizardStage, WizardError> {
        self.ensure_idle_submission()?;

        let (provider, date) = match &self.selection {
            Selection::DateSelected { provider, date } | Selection::TimeSelected { provider, date, .. } => {
                (provider.clone(), *date)
            }
            _ => {
                return Err(ValidationError::StageNotReached {
                    required: WizardStage::DateSelected,
                    current: self.stage(),
                }
                .into())
            }
        };

        if !self.availability.is_time_slot_available(time) {
            warn!("Rejected time {} for provider {}", time, provider.id);
            return Err(ValidationError::TimeNotAvailable(time).into());
        }

        self.selection = Selection::TimeSelected { provider, date, time };
        Ok(self.stage())
    }

    /// Close the panel or abandon the attempt; no booking is produced
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.ensure_idle_submission()?;
        self.selection = Selection::Idle;
        Ok(())
    }

    /// Build the booking for the current selections and mark the wizard as
    /// submitting. The date is checked against today once more; if it has
    /// slipped out of the window the wizard falls back to provider selection.
    pub fn begin_submission(&mut self) -> Result<DomainBooking, WizardError> {
        self.ensure_idle_submission()?;

        let (provider, date, time) = match &self.selection {
            Selection::TimeSelected { provider, date, time } => (provider.clone(), *date, *time),
            other => {
                return Err(WizardError::NotReady {
                    stage: other.stage().number(),
                })
            }
        };

        if !self.availability.is_date_available(&provider, date) {
            warn!("Date {} is no longer bookable for provider {}", date, provider.id);
            self.selection = Selection::ProviderSelected { provider: provider.clone() };
            return Err(ValidationError::DateNotAvailable {
                provider_id: provider.id,
                date,
            }
            .into());
        }

        self.submitting = true;
        Ok(DomainBooking {
            provider_id: provider.id,
            date,
            time,
            duration_minutes: SESSION_DURATION_MINUTES,
            price: provider.hourly_rate,
        })
    }

    /// Apply the sink's answer to an in-flight submission. Success resets the
    /// wizard; failure keeps every selection and reports the error.
    pub fn finish_submission(&mut self, outcome: Result<(), SubmissionError>) -> Result<(), WizardError> {
        if !self.submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }
        self.submitting = false;

        match outcome {
            Ok(()) => {
                self.selection = Selection::Idle;
                Ok(())
            }
            Err(e) => {
                warn!("Booking submission failed, keeping selections: {}", e);
                Err(e.into())
            }
        }
    }

    /// Confirm the booking through `sink` in one step
    pub async fn confirm(&mut self, sink: &dyn ConfirmationSink) -> Result<DomainBooking, WizardError> {
        let booking = self.begin_submission()?;
        let outcome = sink.submit(&booking).await;
        self.finish_submission(outcome)?;
        Ok(booking)
    }

    fn ensure_idle_submission(&self) -> Result<(), WizardError> {
        if self.submitting {
            Err(WizardError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }
}
