//! Shared HTTP error mapping.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wire shape for every error the API returns.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("INVALID_FORMAT", message)
    }
}

/// Maps an error code onto the HTTP status it surfaces as.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::CodeNotFound | ErrorCode::ProjectNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::CodeAlreadyCompleted
        | ErrorCode::CodeNotStarted => StatusCode::CONFLICT,
        ErrorCode::GenerationExhausted => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a domain error as its HTTP response.
pub fn domain_error_response(error: DomainError) -> Response {
    let status = status_for(error.code);
    let body = ErrorResponse::new(error.code.to_string(), error.message);
    (status, Json(body)).into_response()
}
