//! # Storage Module
//!
//! Persistence for the favorites and "My Bookings" screens.
//!
//! Everything the app keeps between visits goes through one narrow port,
//! [`KeyValueStorage`]: string keys mapped to string values, with get, set and
//! remove. The domain never sees a concrete backend, so the same services run
//! against an in-memory map in tests and a SQLite file in production.
//!
//! ## Layout
//!
//! - **traits**: the `KeyValueStorage` port
//! - **memory**: process-local adapter backed by a `BTreeMap`
//! - **sqlite**: `key_values` table in a SQLite database via SQLx
//! - **repositories**: JSON documents for favorites and bookings stored under
//!   fixed keys

pub mod traits;
pub mod memory;
pub mod sqlite;
pub mod repositories;
#[cfg(test)]
pub mod test_utils;

pub use traits::KeyValueStorage;
pub use memory::InMemoryKeyValueStorage;
pub use sqlite::SqliteKeyValueStorage;
pub use repositories::{BookingRepository, FavoriteRepository};
