//! # REST API for "My Bookings"

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::{BookingListRequest, RemoveBookingResponse, UpdateBookingNoteResponse, UpdateNoteRequest};

use crate::io::rest::error_mapping::service_error_response;
use crate::io::rest::mappers::BookingMapper;
use crate::AppState;

/// Create a router for booking list APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", put(update_booking_note).delete(remove_booking))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListRequest>,
) -> impl IntoResponse {
    info!("GET /api/bookings - query: {:?}", query);

    match state
        .my_bookings_service
        .list_bookings(query.query.as_deref(), query.status)
        .await
    {
        Ok(entries) => (StatusCode::OK, Json(BookingMapper::to_list_response(entries))).into_response(),
        Err(e) => service_error_response(e, "Error retrieving bookings"),
    }
}

pub async fn update_booking_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateNoteRequest>,
) -> impl IntoResponse {
    info!("PUT /api/bookings/{}", id);

    match state.my_bookings_service.update_note(&id, request.note).await {
        Ok(entry) => {
            let response = UpdateBookingNoteResponse {
                booking: BookingMapper::to_dto(entry),
                success_message: "Note saved".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to update booking note"),
    }
}

pub async fn remove_booking(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/bookings/{}", id);

    match state.my_bookings_service.remove_booking(&id).await {
        Ok(()) => {
            let response = RemoveBookingResponse {
                removed_id: id,
                success_message: "Booking removed".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to remove booking"),
    }
}
