//! HTTP error handling and response types.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::BookingRequestError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Missing or wrong admin token
    Unauthorized(String),
    /// Request clashes with the current availability
    Conflict { message: String, details: String },
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unauthorized(msg) => {
                let mut response =
                    (StatusCode::UNAUTHORIZED, Json(ApiError::new("UNAUTHORIZED", msg)))
                        .into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return response;
            }
            AppError::Conflict { message, details } => (
                StatusCode::CONFLICT,
                ApiError::new("CONFLICT", message).with_details(details),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => repository_error(e),
        };

        (status, Json(error)).into_response()
    }
}

fn repository_error(err: RepositoryError) -> (StatusCode, ApiError) {
    let details = err.context().to_string();
    let (status, code, message) = match err {
        RepositoryError::NotFound { message, .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
        RepositoryError::ValidationError { message, .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
        }
        RepositoryError::ConflictError { message, .. } => {
            (StatusCode::CONFLICT, "CONFLICT", message)
        }
        RepositoryError::ConnectionError { message, .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", message)
        }
        RepositoryError::ConfigurationError { message, .. }
        | RepositoryError::InternalError { message, .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR", message)
        }
    };
    (status, ApiError::new(code, message).with_details(details))
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<BookingRequestError> for AppError {
    fn from(err: BookingRequestError) -> Self {
        match err {
            BookingRequestError::Incomplete => AppError::BadRequest(err.to_string()),
            BookingRequestError::Unavailable { state, .. } => AppError::Conflict {
                message: err.to_string(),
                details: serde_json::to_string(&state).unwrap_or_default(),
            },
            BookingRequestError::Contact(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_status() {
        let cases = [
            (RepositoryError::not_found("gone"), StatusCode::NOT_FOUND),
            (RepositoryError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                RepositoryError::connection("down"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RepositoryError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = AppError::Unauthorized("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_incomplete_request_is_bad_request() {
        let response = AppError::from(BookingRequestError::Incomplete).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
