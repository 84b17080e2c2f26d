use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ErrorResponse;

/// Handler for 404 Not Found errors.
///
/// Use as the router fallback so unknown routes get a JSON body
/// instead of an empty response.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        error: "Resource Not Found".to_string(),
        message: "The requested resource was not found".to_string(),
    });

    (StatusCode::NOT_FOUND, body).into_response()
}
