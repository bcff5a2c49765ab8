//! Wizard sessions.
//!
//! Every open booking panel owns one [`BookingWizard`], addressed by a
//! session id. The registry lock is only held while a wizard is read or
//! mutated, never across the confirmation sink call; the wizard's own
//! in-flight flag keeps a second confirm from slipping in meanwhile.
//!
//! Sessions untouched for longer than the idle timeout are dropped the next
//! time a wizard is opened. A wizard with a confirmation in flight is never
//! dropped.

use log::{info, warn};
use shared::{Specialization, ThemeToken, WizardStage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::domain::availability::{AvailabilityService, AvailableDate, BookableSlot};
use crate::domain::booking_wizard::BookingWizard;
use crate::domain::catalog::ProviderDirectory;
use crate::domain::confirmation::ConfirmationSink;
use crate::domain::errors::{SubmissionError, WizardError};
use crate::domain::models::{DomainBooking, DomainProvider};

pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only picture of a wizard for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub session_id: Uuid,
    pub specialization: Specialization,
    pub theme: ThemeToken,
    pub stage: WizardStage,
    pub provider: Option<DomainProvider>,
    pub date: Option<AvailableDate>,
    pub time: Option<BookableSlot>,
    pub submitting: bool,
    pub available_dates: Vec<AvailableDate>,
    pub available_time_slots: Vec<BookableSlot>,
}

/// Outcome of a successful confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedBooking {
    pub booking: DomainBooking,
    pub summary: String,
    pub view: WizardView,
}

struct Session {
    wizard: BookingWizard,
    last_touched: Instant,
}

impl Session {
    fn is_idle(&self, idle_timeout: Duration) -> bool {
        !self.wizard.is_submitting() && self.last_touched.elapsed() >= idle_timeout
    }
}

#[derive(Clone)]
pub struct WizardSessionService {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    directory: Arc<ProviderDirectory>,
    availability: AvailabilityService,
    sink: Arc<dyn ConfirmationSink>,
    idle_timeout: Duration,
    sink_timeout: Duration,
}

impl WizardSessionService {
    pub fn new(
        directory: Arc<ProviderDirectory>,
        availability: AvailabilityService,
        sink: Arc<dyn ConfirmationSink>,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            directory,
            availability,
            sink,
            idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            sink_timeout: DEFAULT_SINK_TIMEOUT,
        }
    }

    /// How long a session may sit untouched before it is dropped
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// How long a confirmation may wait on the sink before it counts as failed
    pub fn with_sink_timeout(mut self, sink_timeout: Duration) -> Self {
        self.sink_timeout = sink_timeout;
        self
    }

    /// Open a fresh wizard over a specialization's catalog
    pub fn open(&self, specialization: Specialization) -> Result<WizardView, WizardError> {
        let catalog = self
            .directory
            .catalog(specialization)
            .ok_or(WizardError::CatalogUnavailable(specialization))?;
        let wizard = BookingWizard::for_catalog(catalog, self.availability.clone());
        let session_id = Uuid::new_v4();
        let view = self.view_of(session_id, &wizard);

        let mut sessions = self.lock_sessions();
        self.evict_idle(&mut sessions);
        sessions.insert(
            session_id,
            Session {
                wizard,
                last_touched: Instant::now(),
            },
        );
        info!("🧭 Opened {} booking wizard {}", specialization, session_id);
        Ok(view)
    }

    pub fn get(&self, session_id: Uuid) -> Result<WizardView, WizardError> {
        self.with_wizard(session_id, |_| Ok(()))
    }

    pub fn select_provider(&self, session_id: Uuid, provider_id: u32) -> Result<WizardView, WizardError> {
        self.with_wizard(session_id, |wizard| wizard.select_provider(provider_id).map(|_| ()))
    }

    pub fn select_date(&self, session_id: Uuid, date_text: &str) -> Result<WizardView, WizardError> {
        let date = self.availability.parse_date(date_text)?;
        self.with_wizard(session_id, |wizard| wizard.select_date(date).map(|_| ()))
    }

    pub fn select_time(&self, session_id: Uuid, time_text: &str) -> Result<WizardView, WizardError> {
        let time = self.availability.parse_time(time_text)?;
        self.with_wizard(session_id, |wizard| wizard.select_time(time).map(|_| ()))
    }

    /// Reset the wizard to its first stage, keeping the session open
    pub fn cancel(&self, session_id: Uuid) -> Result<WizardView, WizardError> {
        self.with_wizard(session_id, |wizard| wizard.cancel())
    }

    /// Close the panel and discard the session
    pub fn close(&self, session_id: Uuid) -> Result<(), WizardError> {
        let mut sessions = self.lock_sessions();
        let wizard = self.touch(&mut sessions, session_id)?;
        if wizard.is_submitting() {
            return Err(WizardError::SubmissionInFlight);
        }
        sessions.remove(&session_id);
        info!("🧭 Closed booking wizard {}", session_id);
        Ok(())
    }

    /// Hand the completed booking to the confirmation sink.
    ///
    /// The sink call and its outcome run on their own task, so a caller that
    /// goes away mid-confirmation still leaves the wizard settled.
    pub async fn confirm(&self, session_id: Uuid) -> Result<ConfirmedBooking, WizardError> {
        let (booking, summary) = {
            let mut sessions = self.lock_sessions();
            let wizard = self.touch(&mut sessions, session_id)?;
            let provider_name = wizard
                .selected_provider()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let booking = wizard.begin_submission()?;
            let summary = format!(
                "Session with {} on {} at {}",
                provider_name,
                self.availability.date_label(booking.date),
                self.availability.format_12_hour(booking.time)
            );
            (booking, summary)
        };

        let service = self.clone();
        let submission =
            tokio::spawn(async move { service.complete_submission(session_id, booking, summary).await });

        match submission.await {
            Ok(result) => result,
            Err(e) => {
                let error = SubmissionError::new(format!("Confirmation task failed: {}", e));
                if let Some(session) = self.lock_sessions().get_mut(&session_id) {
                    if session.wizard.is_submitting() {
                        session.wizard.finish_submission(Err(error.clone()))?;
                    }
                }
                Err(error.into())
            }
        }
    }

    pub fn session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    async fn complete_submission(
        &self,
        session_id: Uuid,
        booking: DomainBooking,
        summary: String,
    ) -> Result<ConfirmedBooking, WizardError> {
        let outcome = match tokio::time::timeout(self.sink_timeout, self.sink.submit(&booking)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    "Confirmation sink gave no answer for wizard {} within {:?}",
                    session_id, self.sink_timeout
                );
                Err(SubmissionError::new("the booking service did not answer in time"))
            }
        };

        let mut sessions = self.lock_sessions();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(WizardError::SessionNotFound(session_id))?;
        session.last_touched = Instant::now();
        session.wizard.finish_submission(outcome)?;
        info!("🧭 Wizard {} confirmed: {}", session_id, summary);

        Ok(ConfirmedBooking {
            booking,
            summary,
            view: self.view_of(session_id, &session.wizard),
        })
    }

    fn with_wizard<F>(&self, session_id: Uuid, action: F) -> Result<WizardView, WizardError>
    where
        F: FnOnce(&mut BookingWizard) -> Result<(), WizardError>,
    {
        let mut sessions = self.lock_sessions();
        let wizard = self.touch(&mut sessions, session_id)?;
        action(wizard)?;
        Ok(self.view_of(session_id, wizard))
    }

    /// Look up a live session and mark it as used; an idle one is dropped
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, Session>,
        session_id: Uuid,
    ) -> Result<&'a mut BookingWizard, WizardError> {
        let idle = sessions
            .get(&session_id)
            .ok_or(WizardError::SessionNotFound(session_id))?
            .is_idle(self.idle_timeout);
        if idle {
            sessions.remove(&session_id);
            info!("🧭 Dropped idle booking wizard {}", session_id);
            return Err(WizardError::SessionNotFound(session_id));
        }

        let session = sessions
            .get_mut(&session_id)
            .ok_or(WizardError::SessionNotFound(session_id))?;
        session.last_touched = Instant::now();
        Ok(&mut session.wizard)
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Session>) {
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("🧭 Dropped {} idle booking wizard(s)", evicted);
        }
    }

    fn view_of(&self, session_id: Uuid, wizard: &BookingWizard) -> WizardView {
        WizardView {
            session_id,
            specialization: wizard.specialization(),
            theme: wizard.theme().clone(),
            stage: wizard.stage(),
            provider: wizard.selected_provider().cloned(),
            date: wizard.selected_date().map(|date| AvailableDate {
                date,
                label: self.availability.date_label(date),
            }),
            time: wizard.selected_time().map(|time| BookableSlot {
                time,
                label: self.availability.format_12_hour(time),
            }),
            submitting: wizard.is_submitting(),
            available_dates: wizard.available_dates(),
            available_time_slots: wizard.available_time_slots(),
        }
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::FixedClock;
    use crate::domain::errors::{SubmissionError, ValidationError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ConfirmationSink for CountingSink {
        async fn submit(&self, _booking: &DomainBooking) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(SubmissionError::new("reservation API returned 503"))
            } else {
                Ok(())
            }
        }
    }

    /// Blocks until released so a second confirm can race the first
    struct GatedSink {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ConfirmationSink for GatedSink {
        async fn submit(&self, _booking: &DomainBooking) -> Result<(), SubmissionError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    /// Never answers
    struct SilentSink;

    #[async_trait]
    impl ConfirmationSink for SilentSink {
        async fn submit(&self, _booking: &DomainBooking) -> Result<(), SubmissionError> {
            std::future::pending().await
        }
    }

    fn gated_sink() -> Arc<GatedSink> {
        Arc::new(GatedSink {
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    fn setup_service(sink: Arc<dyn ConfirmationSink>) -> WizardSessionService {
        // Thursday
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()));
        WizardSessionService::new(
            Arc::new(ProviderDirectory::builtin().unwrap()),
            AvailabilityService::new(clock),
            sink,
        )
    }

    fn prepare_booking(service: &WizardSessionService) -> Uuid {
        let view = service.open(Specialization::Adhd).unwrap();
        // Dr. James Wilson, Mon/Wed, $70
        service.select_provider(view.session_id, 201).unwrap();
        service.select_date(view.session_id, "2024-01-08").unwrap();
        service.select_time(view.session_id, "14:00").unwrap();
        view.session_id
    }

    #[test]
    fn test_open_and_walk_through_stages() {
        let service = setup_service(Arc::new(CountingSink::default()));
        let view = service.open(Specialization::Adhd).unwrap();
        assert_eq!(view.stage, WizardStage::Idle);
        assert!(view.available_dates.is_empty());

        let view = service.select_provider(view.session_id, 201).unwrap();
        assert_eq!(view.stage, WizardStage::ProviderSelected);
        assert_eq!(view.available_dates.len(), 4);

        let view = service.select_date(view.session_id, "2024-01-10").unwrap();
        assert_eq!(view.date.as_ref().map(|d| d.label.as_str()), Some("Wed, Jan 10"));
        assert_eq!(view.available_time_slots.len(), 17);

        let view = service.select_time(view.session_id, "9:00").unwrap();
        assert_eq!(view.stage, WizardStage::TimeSelected);
        assert_eq!(view.time.map(|t| t.label), Some("9:00 AM".to_string()));
    }

    #[test]
    fn test_wizards_are_scoped_to_their_catalog() {
        let service = setup_service(Arc::new(CountingSink::default()));
        let view = service.open(Specialization::Autism).unwrap();
        // 201 belongs to the ADHD catalog
        assert_eq!(
            service.select_provider(view.session_id, 201),
            Err(WizardError::Validation(ValidationError::UnknownProvider(201)))
        );
    }

    #[test]
    fn test_malformed_input_and_unknown_session() {
        let service = setup_service(Arc::new(CountingSink::default()));
        let view = service.open(Specialization::Adhd).unwrap();
        service.select_provider(view.session_id, 201).unwrap();

        assert!(matches!(
            service.select_date(view.session_id, "next monday"),
            Err(WizardError::Validation(ValidationError::MalformedDate(_)))
        ));
        let missing = Uuid::new_v4();
        assert_eq!(service.get(missing), Err(WizardError::SessionNotFound(missing)));
    }

    #[tokio::test]
    async fn test_confirm_hands_booking_to_sink_and_resets() {
        let sink = Arc::new(CountingSink::default());
        let service = setup_service(sink.clone());
        let session_id = prepare_booking(&service);

        let confirmed = service.confirm(session_id).await.unwrap();
        assert_eq!(confirmed.booking.price, 70.0);
        assert_eq!(confirmed.booking.duration_minutes, 60);
        assert_eq!(confirmed.summary, "Session with Dr. James Wilson on Mon, Jan 8 at 2:00 PM");
        assert_eq!(confirmed.view.stage, WizardStage::Idle);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_keeps_selections() {
        let sink = Arc::new(CountingSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let service = setup_service(sink.clone());
        let session_id = prepare_booking(&service);

        assert!(matches!(service.confirm(session_id).await, Err(WizardError::Submission(_))));
        let view = service.get(session_id).unwrap();
        assert_eq!(view.stage, WizardStage::TimeSelected);
        assert!(!view.submitting);

        sink.fail.store(false, Ordering::SeqCst);
        assert!(service.confirm(session_id).await.is_ok());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_double_submission_is_rejected() {
        let sink = gated_sink();
        let service = setup_service(sink.clone());
        let session_id = prepare_booking(&service);

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.confirm(session_id).await })
        };
        sink.entered.notified().await;

        assert!(service.get(session_id).unwrap().submitting);
        assert_eq!(service.confirm(session_id).await, Err(WizardError::SubmissionInFlight));
        assert_eq!(service.close(session_id), Err(WizardError::SubmissionInFlight));

        sink.release.notify_one();
        let confirmed = first.await.unwrap().unwrap();
        assert_eq!(confirmed.view.stage, WizardStage::Idle);
    }

    #[test]
    fn test_cancel_and_close() {
        let service = setup_service(Arc::new(CountingSink::default()));
        let session_id = prepare_booking(&service);

        let view = service.cancel(session_id).unwrap();
        assert_eq!(view.stage, WizardStage::Idle);
        assert!(view.provider.is_none());

        assert_eq!(service.session_count(), 1);
        service.close(session_id).unwrap();
        assert_eq!(service.session_count(), 0);
        assert_eq!(service.close(session_id), Err(WizardError::SessionNotFound(session_id)));
    }

    #[tokio::test]
    async fn test_abandoned_confirm_still_settles_the_wizard() {
        let sink = gated_sink();
        let service = setup_service(sink.clone());
        let session_id = prepare_booking(&service);

        let request = {
            let service = service.clone();
            tokio::spawn(async move { service.confirm(session_id).await })
        };
        sink.entered.notified().await;
        request.abort();
        assert!(request.await.unwrap_err().is_cancelled());

        sink.release.notify_one();
        let settled = tokio::time::timeout(Duration::from_secs(5), async {
            while service.get(session_id).unwrap().submitting {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(settled.is_ok(), "wizard stayed in submission");

        let view = service.get(session_id).unwrap();
        assert_eq!(view.stage, WizardStage::Idle);
        assert!(service.cancel(session_id).is_ok());
        assert!(service.close(session_id).is_ok());
    }

    #[tokio::test]
    async fn test_unanswered_sink_times_out_and_keeps_selections() {
        let service = setup_service(Arc::new(SilentSink)).with_sink_timeout(Duration::from_millis(20));
        let session_id = prepare_booking(&service);

        assert!(matches!(service.confirm(session_id).await, Err(WizardError::Submission(_))));
        let view = service.get(session_id).unwrap();
        assert_eq!(view.stage, WizardStage::TimeSelected);
        assert!(!view.submitting);
        assert!(service.close(session_id).is_ok());
    }

    #[tokio::test]
    async fn test_opening_a_wizard_drops_idle_sessions() {
        let service = setup_service(Arc::new(CountingSink::default())).with_idle_timeout(Duration::from_millis(50));
        let stale = service.open(Specialization::Adhd).unwrap().session_id;

        tokio::time::sleep(Duration::from_millis(80)).await;
        let fresh = service.open(Specialization::Autism).unwrap().session_id;

        assert_eq!(service.session_count(), 1);
        assert!(service.get(fresh).is_ok());
        assert_eq!(service.get(stale), Err(WizardError::SessionNotFound(stale)));
    }

    #[tokio::test]
    async fn test_idle_session_is_gone_even_before_the_next_open() {
        let service = setup_service(Arc::new(CountingSink::default())).with_idle_timeout(Duration::from_millis(50));
        let session_id = prepare_booking(&service);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(
            service.select_time(session_id, "15:00"),
            Err(WizardError::SessionNotFound(session_id))
        );
        assert_eq!(service.session_count(), 0);
    }

    #[tokio::test]
    async fn test_submitting_session_survives_the_idle_sweep() {
        let sink = gated_sink();
        let service = setup_service(sink.clone()).with_idle_timeout(Duration::from_millis(50));
        let session_id = prepare_booking(&service);

        let request = {
            let service = service.clone();
            tokio::spawn(async move { service.confirm(session_id).await })
        };
        sink.entered.notified().await;

        tokio::time::sleep(Duration::from_millis(80)).await;
        service.open(Specialization::Adhd).unwrap();
        assert_eq!(service.session_count(), 2);

        sink.release.notify_one();
        let confirmed = request.await.unwrap().unwrap();
        assert_eq!(confirmed.view.stage, WizardStage::Idle);
    }

    #[test]
    fn test_recent_sessions_are_kept() {
        let service = setup_service(Arc::new(CountingSink::default()));
        let first = service.open(Specialization::Adhd).unwrap().session_id;
        service.open(Specialization::Adhd).unwrap();

        assert_eq!(service.session_count(), 2);
        assert!(service.get(first).is_ok());
    }
}
