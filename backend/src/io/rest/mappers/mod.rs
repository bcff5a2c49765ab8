//! Conversions between domain models and the `shared` wire DTOs.

pub mod provider_mapper;
pub mod wizard_mapper;
pub mod booking_mapper;
pub mod favorite_mapper;

pub use provider_mapper::ProviderMapper;
pub use wizard_mapper::WizardMapper;
pub use booking_mapper::BookingMapper;
pub use favorite_mapper::FavoriteMapper;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for times of day (24-hour)
pub const TIME_FORMAT: &str = "%H:%M";
