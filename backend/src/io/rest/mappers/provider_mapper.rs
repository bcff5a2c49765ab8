use shared::{AvailableDatesResponse, DateOption, Provider, ProviderListResponse, TimeSlot, TimeSlotsResponse};

use super::{DATE_FORMAT, TIME_FORMAT};
use crate::domain::models::DomainProvider;
use crate::domain::{AvailableDate, BookableSlot, ProviderListing};

pub struct ProviderMapper;

impl ProviderMapper {
    /// Convert domain DomainProvider to shared Provider DTO
    pub fn to_dto(domain: DomainProvider) -> Provider {
        Provider {
            availability: domain.availability_abbreviations(),
            id: domain.id,
            name: domain.name,
            title: domain.title,
            specialization: domain.specialization,
            expertise: domain.expertise,
            rating: domain.rating,
            review_count: domain.review_count,
            hourly_rate: domain.hourly_rate,
        }
    }

    pub fn to_dto_list(domain_providers: Vec<DomainProvider>) -> Vec<Provider> {
        domain_providers.into_iter().map(Self::to_dto).collect()
    }

    pub fn date_to_dto(date: AvailableDate) -> DateOption {
        DateOption {
            date: date.date.format(DATE_FORMAT).to_string(),
            label: date.label,
        }
    }

    pub fn slot_to_dto(slot: BookableSlot) -> TimeSlot {
        TimeSlot {
            time: slot.time.format(TIME_FORMAT).to_string(),
            label: slot.label,
        }
    }

    pub fn to_list_response(listing: ProviderListing) -> ProviderListResponse {
        ProviderListResponse {
            providers: Self::to_dto_list(listing.providers),
            theme: listing.theme,
        }
    }

    pub fn to_dates_response(provider_id: u32, dates: Vec<AvailableDate>) -> AvailableDatesResponse {
        AvailableDatesResponse {
            provider_id,
            dates: dates.into_iter().map(Self::date_to_dto).collect(),
        }
    }

    pub fn to_time_slots_response(slots: Vec<BookableSlot>) -> TimeSlotsResponse {
        TimeSlotsResponse {
            slots: slots.into_iter().map(Self::slot_to_dto).collect(),
        }
    }
}
