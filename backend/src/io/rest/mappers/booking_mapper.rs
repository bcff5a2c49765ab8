use shared::{BookingListResponse, BookingRecord};

use super::WizardMapper;
use crate::domain::BookingEntry;

pub struct BookingMapper;

impl BookingMapper {
    /// Convert a stored booking (with its status) to the shared DTO
    pub fn to_dto(entry: BookingEntry) -> BookingRecord {
        let record = entry.record;
        BookingRecord {
            id: record.id,
            booking: WizardMapper::booking_to_dto(record.booking),
            provider_name: record.provider_name,
            specialization: record.specialization,
            note: record.note,
            status: entry.status,
            created_at: record.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(entries: Vec<BookingEntry>) -> BookingListResponse {
        BookingListResponse {
            bookings: entries.into_iter().map(Self::to_dto).collect(),
        }
    }
}
