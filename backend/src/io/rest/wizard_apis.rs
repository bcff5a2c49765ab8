//! # REST API for the booking wizard
//!
//! One session per open booking panel. Every call answers with the current
//! wizard snapshot so the client can render the right stage.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{OpenWizardRequest, SelectDateRequest, SelectProviderRequest, SelectTimeRequest};
use uuid::Uuid;

use crate::domain::{WizardError, WizardView};
use crate::io::rest::error_mapping::wizard_error_response;
use crate::io::rest::mappers::WizardMapper;
use crate::AppState;

/// Create a router for wizard related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wizard", post(open_wizard))
        .route("/wizard/:session", get(get_wizard).delete(close_wizard))
        .route("/wizard/:session/provider", post(select_provider))
        .route("/wizard/:session/date", post(select_date))
        .route("/wizard/:session/time", post(select_time))
        .route("/wizard/:session/cancel", post(cancel_wizard))
        .route("/wizard/:session/confirm", post(confirm_booking))
}

fn snapshot_response(result: Result<WizardView, WizardError>, success: StatusCode) -> axum::response::Response {
    match result {
        Ok(view) => (success, Json(WizardMapper::to_snapshot(view))).into_response(),
        Err(e) => wizard_error_response(e),
    }
}

pub async fn open_wizard(
    State(state): State<AppState>,
    Json(request): Json<OpenWizardRequest>,
) -> impl IntoResponse {
    info!("POST /api/wizard - request: {:?}", request);
    snapshot_response(state.wizard_service.open(request.specialization), StatusCode::CREATED)
}

pub async fn get_wizard(State(state): State<AppState>, Path(session): Path<Uuid>) -> impl IntoResponse {
    info!("GET /api/wizard/{}", session);
    snapshot_response(state.wizard_service.get(session), StatusCode::OK)
}

pub async fn select_provider(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    Json(request): Json<SelectProviderRequest>,
) -> impl IntoResponse {
    info!("POST /api/wizard/{}/provider - request: {:?}", session, request);
    snapshot_response(
        state.wizard_service.select_provider(session, request.provider_id),
        StatusCode::OK,
    )
}

pub async fn select_date(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    Json(request): Json<SelectDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/wizard/{}/date - request: {:?}", session, request);
    snapshot_response(state.wizard_service.select_date(session, &request.date), StatusCode::OK)
}

pub async fn select_time(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    Json(request): Json<SelectTimeRequest>,
) -> impl IntoResponse {
    info!("POST /api/wizard/{}/time - request: {:?}", session, request);
    snapshot_response(state.wizard_service.select_time(session, &request.time), StatusCode::OK)
}

pub async fn cancel_wizard(State(state): State<AppState>, Path(session): Path<Uuid>) -> impl IntoResponse {
    info!("POST /api/wizard/{}/cancel", session);
    snapshot_response(state.wizard_service.cancel(session), StatusCode::OK)
}

pub async fn close_wizard(State(state): State<AppState>, Path(session): Path<Uuid>) -> impl IntoResponse {
    info!("DELETE /api/wizard/{}", session);

    match state.wizard_service.close(session) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => wizard_error_response(e),
    }
}

/// Hand the booking to the confirmation sink
pub async fn confirm_booking(State(state): State<AppState>, Path(session): Path<Uuid>) -> impl IntoResponse {
    info!("POST /api/wizard/{}/confirm", session);

    match state.wizard_service.confirm(session).await {
        Ok(confirmed) => (StatusCode::OK, Json(WizardMapper::to_confirm_response(confirmed))).into_response(),
        Err(e) => wizard_error_response(e),
    }
}
