//! # REST API for favorite providers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::{AddFavoriteRequest, FavoriteListRequest, FavoriteResponse, RemoveFavoriteResponse, UpdateNoteRequest};

use crate::io::rest::error_mapping::service_error_response;
use crate::io::rest::mappers::FavoriteMapper;
use crate::AppState;

/// Create a router for favorites related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/:provider_id", put(update_favorite_note).delete(remove_favorite))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Query(query): Query<FavoriteListRequest>,
) -> impl IntoResponse {
    info!("GET /api/favorites - query: {:?}", query);

    match state.favorites_service.list_favorites(query.query.as_deref()).await {
        Ok(entries) => (StatusCode::OK, Json(FavoriteMapper::to_list_response(entries))).into_response(),
        Err(e) => service_error_response(e, "Error retrieving favorites"),
    }
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<AddFavoriteRequest>,
) -> impl IntoResponse {
    info!("POST /api/favorites - request: {:?}", request);

    match state
        .favorites_service
        .add_favorite(request.provider_id, request.note)
        .await
    {
        Ok(entry) => {
            let response = FavoriteResponse {
                success_message: format!("{} added to favorites", entry.provider.name),
                favorite: FavoriteMapper::to_dto(entry),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to add favorite"),
    }
}

pub async fn update_favorite_note(
    State(state): State<AppState>,
    Path(provider_id): Path<u32>,
    Json(request): Json<UpdateNoteRequest>,
) -> impl IntoResponse {
    info!("PUT /api/favorites/{}", provider_id);

    match state.favorites_service.update_note(provider_id, request.note).await {
        Ok(entry) => {
            let response = FavoriteResponse {
                success_message: "Note saved".to_string(),
                favorite: FavoriteMapper::to_dto(entry),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to update favorite note"),
    }
}

pub async fn remove_favorite(State(state): State<AppState>, Path(provider_id): Path<u32>) -> impl IntoResponse {
    info!("DELETE /api/favorites/{}", provider_id);

    match state.favorites_service.remove_favorite(provider_id).await {
        Ok(()) => {
            let response = RemoveFavoriteResponse {
                provider_id,
                success_message: "Removed from favorites".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => service_error_response(e, "Failed to remove favorite"),
    }
}
