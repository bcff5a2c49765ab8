//! Domain models for the specialist booking flow.
//!
//! These are the backend's own representations; the `shared` crate holds the
//! wire DTOs and `io::rest::mappers` converts between the two.

pub mod provider;
pub mod booking;
pub mod favorite;

pub use provider::*;
pub use booking::*;
pub use favorite::*;
