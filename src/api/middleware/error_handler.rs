//! Error to HTTP response mapping.
//!
//! Client and business errors carry their message to the caller.
//! Infrastructure errors are logged in full and answered generically.

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::NotFound { message }
            | AppError::Duplicate { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message } => ErrorResponse::new(message.as_str()),
            AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
            _ => {
                tracing::error!(error = ?self, "Request failed");
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Path parameters that cannot be decoded (bad percent-encoding, for one)
pub fn handle_path_rejection(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected path parameters");
    AppError::bad_request("Invalid path parameters")
}
