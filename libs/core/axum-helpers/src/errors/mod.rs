//! Application error type and its HTTP rendering.
//!
//! Every error the API returns falls into one of six categories, each
//! with a fixed HTTP status and `error` label. The response body is
//! always `{ "error": "...", "message": "..." }`.

pub mod handlers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Duplicated values",
///   "message": "user with username: 'alice' already exists"
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category label
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input: failed validation, unparseable body, bad id,
    /// unsupported Authorization scheme.
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A uniqueness constraint would be violated.
    #[error("Conflict: {resource} with {field}: '{value}' already exists")]
    Duplicate {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// The referenced entity does not exist.
    #[error("Not Found: {resource} with {field}: '{value}' does not exist")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Missing or invalid credentials.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Authenticated but lacking the required role.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unexpected failure. The detail is logged, never sent to the client.
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(message) => {
                tracing::debug!(message = %message, "Bad request");
                (StatusCode::BAD_REQUEST, "Invalid values", message)
            }
            AppError::Duplicate {
                resource,
                field,
                value,
            } => {
                tracing::debug!(resource, field, value = %value, "Duplicate resource");
                (
                    StatusCode::CONFLICT,
                    "Duplicated values",
                    format!("{} with {}: '{}' already exists", resource, field, value),
                )
            }
            AppError::NotFound {
                resource,
                field,
                value,
            } => {
                tracing::debug!(resource, field, value = %value, "Resource not found");
                (
                    StatusCode::NOT_FOUND,
                    "Resource Not Found",
                    format!("{} with {}: '{}' does not exist", resource, field, value),
                )
            }
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "User unauthenticated",
                "You are not logged in".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::FORBIDDEN,
                "User not authorised",
                "You do not have sufficient privilege to view this".to_string(),
            ),
            AppError::Internal(details) => {
                tracing::error!(details = %details, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "Please try again later".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
