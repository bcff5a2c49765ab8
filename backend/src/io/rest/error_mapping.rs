//! Translation of domain failures into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};

use crate::domain::{RecordError, ValidationError, WizardError};

pub fn wizard_error_status(err: &WizardError) -> StatusCode {
    match err {
        WizardError::Validation(_) | WizardError::NotReady { .. } => StatusCode::BAD_REQUEST,
        WizardError::SessionNotFound(_) | WizardError::CatalogUnavailable(_) => StatusCode::NOT_FOUND,
        WizardError::SubmissionInFlight | WizardError::NoSubmissionInFlight => StatusCode::CONFLICT,
        WizardError::Submission(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn record_error_status(err: &RecordError) -> StatusCode {
    match err {
        RecordError::NotFound(_) => StatusCode::NOT_FOUND,
        RecordError::AlreadyExists(_) => StatusCode::CONFLICT,
        RecordError::NoteTooLong { .. } => StatusCode::BAD_REQUEST,
    }
}

pub fn wizard_error_response(err: WizardError) -> Response {
    let status = wizard_error_status(&err);
    if status.is_server_error() {
        error!("Booking wizard failure: {}", err);
    } else {
        warn!("Booking wizard rejected request: {}", err);
    }
    (status, err.to_string()).into_response()
}

/// Responses for the list screens. Anything that is not a known domain error
/// is a storage failure.
pub fn service_error_response(err: anyhow::Error, context: &str) -> Response {
    let status = if let Some(record_error) = err.downcast_ref::<RecordError>() {
        record_error_status(record_error)
    } else if err.downcast_ref::<ValidationError>().is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if status.is_server_error() {
        error!("{}: {:#}", context, err);
        (status, context.to_string()).into_response()
    } else {
        warn!("{}: {}", context, err);
        (status, err.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionError;
    use shared::WizardStage;

    #[test]
    fn test_wizard_error_statuses() {
        assert_eq!(
            wizard_error_status(&ValidationError::UnknownProvider(7).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            wizard_error_status(&WizardError::Validation(ValidationError::StageNotReached {
                required: WizardStage::DateSelected,
                current: WizardStage::Idle,
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            wizard_error_status(&WizardError::SessionNotFound(uuid::Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(wizard_error_status(&WizardError::SubmissionInFlight), StatusCode::CONFLICT);
        assert_eq!(
            wizard_error_status(&SubmissionError::new("down").into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_service_errors_fall_back_to_internal() {
        let not_found = service_error_response(RecordError::NotFound("Booking x".into()).into(), "Failed");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let duplicate = service_error_response(RecordError::AlreadyExists("Favorite".into()).into(), "Failed");
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let storage = service_error_response(anyhow::anyhow!("disk I/O error"), "Failed to load bookings");
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
