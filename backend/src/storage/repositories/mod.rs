//! JSON document repositories on top of the key-value port.

pub mod favorite_repository;
pub mod booking_repository;

pub use favorite_repository::FavoriteRepository;
pub use booking_repository::BookingRepository;
