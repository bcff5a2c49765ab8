//! # Domain Module
//!
//! Business logic for booking sessions with neurodivergent-care specialists.
//!
//! Nothing in here knows about HTTP or about a concrete database. Services
//! take their collaborators (provider directory, clock, storage repositories,
//! confirmation sink) at construction time.
//!
//! ## Module Organization
//!
//! - **catalog**: per-specialization provider lists with their theme token
//! - **expertise_filter**: case-insensitive substring search over expertise tags
//! - **availability**: bookable dates and time slots, date/time labels, the `Clock` seam
//! - **booking_wizard**: the four-stage provider → date → time → confirm state machine
//! - **confirmation**: the `ConfirmationSink` port and its adapters
//! - **wizard_session_service**: one wizard per open booking panel
//! - **provider_service**: provider listings and availability lookups
//! - **favorites_service**: pinned providers with notes
//! - **my_bookings_service**: past and upcoming sessions with notes
//!
//! ## Business Rules
//!
//! - A wizard never holds a date without a provider, or a time without a date
//! - Dates are offered 1 to 14 days ahead, on the provider's working weekdays only
//! - Time slots run every 30 minutes from 9:00 AM to 5:00 PM
//! - A booking lasts 60 minutes and costs the provider's hourly rate
//! - Only one confirmation per wizard may be in flight

pub mod availability;
pub mod booking_wizard;
pub mod catalog;
pub mod confirmation;
pub mod errors;
pub mod expertise_filter;
pub mod favorites_service;
pub mod models;
pub mod my_bookings_service;
pub mod provider_service;
pub mod wizard_session_service;

pub use availability::*;
pub use booking_wizard::*;
pub use catalog::*;
pub use confirmation::*;
pub use errors::*;
pub use expertise_filter::*;
pub use favorites_service::*;
pub use my_bookings_service::*;
pub use provider_service::*;
pub use wizard_session_service::*;
