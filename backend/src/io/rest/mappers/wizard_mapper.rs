use shared::{Booking, ConfirmBookingResponse, WizardSnapshot};

use super::{ProviderMapper, DATE_FORMAT, TIME_FORMAT};
use crate::domain::models::DomainBooking;
use crate::domain::{ConfirmedBooking, WizardView};

pub struct WizardMapper;

impl WizardMapper {
    pub fn to_snapshot(view: WizardView) -> WizardSnapshot {
        WizardSnapshot {
            session_id: view.session_id.to_string(),
            specialization: view.specialization,
            theme: view.theme,
            stage: view.stage,
            stage_number: view.stage.number(),
            selected_provider: view.provider.map(ProviderMapper::to_dto),
            selected_date: view.date.map(ProviderMapper::date_to_dto),
            selected_time: view.time.map(ProviderMapper::slot_to_dto),
            submitting: view.submitting,
            available_dates: view.available_dates.into_iter().map(ProviderMapper::date_to_dto).collect(),
            available_time_slots: view
                .available_time_slots
                .into_iter()
                .map(ProviderMapper::slot_to_dto)
                .collect(),
        }
    }

    pub fn booking_to_dto(domain: DomainBooking) -> Booking {
        Booking {
            provider_id: domain.provider_id,
            date: domain.date.format(DATE_FORMAT).to_string(),
            time: domain.time.format(TIME_FORMAT).to_string(),
            duration_minutes: domain.duration_minutes,
            price: domain.price,
        }
    }

    pub fn to_confirm_response(confirmed: ConfirmedBooking) -> ConfirmBookingResponse {
        ConfirmBookingResponse {
            success_message: format!("Booked! {}", confirmed.summary),
            booking: Self::booking_to_dto(confirmed.booking),
            summary: confirmed.summary,
            wizard: Self::to_snapshot(confirmed.view),
        }
    }
}
