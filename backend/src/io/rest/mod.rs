//! # REST API Interface Layer
//!
//! HTTP endpoints for the booking screens. Handlers translate JSON requests
//! into domain calls, map the results back through `mappers`, and turn domain
//! errors into status codes via `error_mapping`.
//!
//! ## Routers
//!
//! - **provider_apis**: `/providers`, `/providers/:id`, `/providers/:id/dates`, `/time-slots`
//! - **wizard_apis**: `/wizard` sessions and their stage transitions
//! - **favorite_apis**: `/favorites`
//! - **booking_apis**: `/bookings` ("My Bookings")

pub mod booking_apis;
pub mod error_mapping;
pub mod favorite_apis;
pub mod mappers;
pub mod provider_apis;
pub mod wizard_apis;
