use crate::application::reservation::{ErrorKind, ReservationApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API error
///
/// Wraps the application error and maps it onto an HTTP response.
#[derive(Debug)]
pub struct ApiError(ReservationApplicationError);

impl From<ReservationApplicationError> for ApiError {
    fn from(err: ReservationApplicationError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match &self.0 {
            ReservationApplicationError::UserNotFound(_) => "USER_NOT_FOUND",
            ReservationApplicationError::BookNotFound(_) => "BOOK_NOT_FOUND",
            ReservationApplicationError::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            ReservationApplicationError::BookNotAvailable(_) => "BOOK_NOT_AVAILABLE",
            ReservationApplicationError::ReservationAlreadyFinalized { .. } => {
                "RESERVATION_ALREADY_FINALIZED"
            }
            ReservationApplicationError::InvalidRentalDays(_) => "INVALID_RENTAL_DAYS",
            ReservationApplicationError::MissingDailyRate(_) => "MISSING_DAILY_RATE",
            ReservationApplicationError::ReservationStoreError(_) => "RESERVATION_STORE_ERROR",
            ReservationApplicationError::BookInventoryError(_) => "BOOK_INVENTORY_ERROR",
            ReservationApplicationError::UserDirectoryError(_) => "USER_DIRECTORY_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_code = self.error_code();

        let (status, message) = match self.0.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            ErrorKind::InvalidState => (StatusCode::CONFLICT, self.0.to_string()),
            ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, self.0.to_string()),
            // details go to the log, the client gets a generic message
            ErrorKind::Collaborator => {
                match std::error::Error::source(&self.0) {
                    Some(source) => tracing::error!("{}: {}", self.0, source),
                    None => tracing::error!("{}", self.0),
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_code, message));
        (status, body).into_response()
    }
}
