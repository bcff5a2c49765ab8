//! # REST API for the provider catalog
//!
//! Listing, lookup and availability for the specialization pages.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{info, warn};
use shared::ProviderListRequest;

use crate::io::rest::mappers::ProviderMapper;
use crate::AppState;

/// Create a router for provider related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/providers/:id", get(get_provider))
        .route("/providers/:id/dates", get(get_available_dates))
        .route("/time-slots", get(get_time_slots))
}

/// Providers of one specialization (or all), filtered by expertise
pub async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<ProviderListRequest>,
) -> impl IntoResponse {
    info!("GET /api/providers - query: {:?}", query);

    let listing = state
        .provider_service
        .list_providers(query.specialization, query.query.as_deref());
    (StatusCode::OK, Json(ProviderMapper::to_list_response(listing))).into_response()
}

pub async fn get_provider(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    info!("GET /api/providers/{}", id);

    match state.provider_service.get_provider(id) {
        Ok(provider) => (StatusCode::OK, Json(ProviderMapper::to_dto(provider))).into_response(),
        // A missing provider is a missing resource here, not a bad selection
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

pub async fn get_available_dates(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    info!("GET /api/providers/{}/dates", id);

    match state.provider_service.available_dates(id) {
        Ok(dates) => (StatusCode::OK, Json(ProviderMapper::to_dates_response(id, dates))).into_response(),
        Err(e) => {
            warn!("No dates for provider {}: {}", id, e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

pub async fn get_time_slots(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/time-slots");

    let slots = state.provider_service.available_time_slots();
    (StatusCode::OK, Json(ProviderMapper::to_time_slots_response(slots))).into_response()
}
