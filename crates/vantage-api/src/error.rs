//! API error types and JSON error response formatting.
//!
//! ApiError provides a consistent JSON error response format across all
//! endpoints, mapping internal errors to appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vantage_chart::ChartError;
use vantage_chat::ChatError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 404 Not Found - resource does not exist.
    NotFound(String),
    /// 409 Conflict - a turn is already in flight for the session.
    Conflict(String),
    /// 422 Unprocessable Entity - valid syntax but the result cannot be
    /// rendered as requested (e.g. too few columns for a chart).
    UnprocessableEntity(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyQuestion | ChatError::QuestionTooLong(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ChatError::TurnInFlight => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::UnknownColumn(_) => ApiError::BadRequest(err.to_string()),
            ChartError::InsufficientColumns | ChartError::NonNumericColumn(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_mapping() {
        assert!(matches!(
            ApiError::from(ChatError::EmptyQuestion),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ChatError::QuestionTooLong(100)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ChatError::TurnInFlight),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_chart_error_mapping() {
        assert!(matches!(
            ApiError::from(ChartError::InsufficientColumns),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(ChartError::UnknownColumn("x".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ChartError::NonNumericColumn("y".to_string())),
            ApiError::UnprocessableEntity(_)
        ));
    }
}
