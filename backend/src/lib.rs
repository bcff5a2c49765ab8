//! # Specialist Booking Backend
//!
//! Booking service for neurodivergent-care specialists: per-specialization
//! provider catalogs, a four-stage booking wizard, favorites and a "My
//! Bookings" list.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (catalogs, wizard, services)
//!     ↓
//! Storage Layer (key-value port, SQLite / in-memory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AppConfig, SinkKind};
use crate::domain::{
    AvailabilityService, Clock, ConfirmationSink, FavoritesService, LoggingConfirmationSink, MyBookingsService,
    ProviderDirectory, ProviderService, RecordingConfirmationSink, SystemClock, WizardSessionService,
};
use crate::io::rest::{booking_apis, favorite_apis, provider_apis, wizard_apis};
use crate::storage::{BookingRepository, FavoriteRepository, KeyValueStorage, SqliteKeyValueStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub provider_service: ProviderService,
    pub wizard_service: WizardSessionService,
    pub favorites_service: FavoritesService,
    pub my_bookings_service: MyBookingsService,
}

/// Wire the services over a storage backend and a clock
pub fn build_app_state(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>, config: &AppConfig) -> Result<AppState> {
    let directory = Arc::new(ProviderDirectory::builtin()?);
    let availability = AvailabilityService::new(clock.clone());

    let provider_service = ProviderService::new(directory.clone(), availability.clone());
    let favorites_service = FavoritesService::new(
        FavoriteRepository::new(storage.clone()),
        directory.clone(),
        clock.clone(),
    );
    let my_bookings_service = MyBookingsService::new(BookingRepository::new(storage), directory.clone(), clock);

    let sink: Arc<dyn ConfirmationSink> = match config.sink {
        SinkKind::Record => Arc::new(RecordingConfirmationSink::new(my_bookings_service.clone())),
        SinkKind::Log => Arc::new(LoggingConfirmationSink),
    };
    let wizard_service = WizardSessionService::new(directory, availability, sink)
        .with_idle_timeout(config.session_idle_timeout());

    Ok(AppState {
        provider_service,
        wizard_service,
        favorites_service,
        my_bookings_service,
    })
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let database_url = config.resolved_database_url()?;
    let storage = SqliteKeyValueStorage::new(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;

    info!("Setting up domain model (sink: {:?})", config.sink);
    build_app_state(Arc::new(storage), Arc::new(SystemClock), config)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(provider_apis::router())
        .merge(wizard_apis::router())
        .merge(favorite_apis::router())
        .merge(booking_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

/// App state over in-memory storage with today fixed to Thursday 2024-01-04
#[cfg(test)]
pub(crate) async fn test_app_state() -> AppState {
    use crate::domain::FixedClock;
    use crate::storage::InMemoryKeyValueStorage;
    use chrono::NaiveDate;

    let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()));
    build_app_state(Arc::new(InMemoryKeyValueStorage::new()), clock, &AppConfig::default())
        .expect("Failed to build test app state")
}
