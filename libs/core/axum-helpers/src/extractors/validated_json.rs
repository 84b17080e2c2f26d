//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor with automatic validation.
///
/// Deserializes the request body, then runs the payload's `Validate`
/// impl. Both a malformed body and a failing rule reject with a 400
/// carrying the offending message.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn register(ValidatedJson(payload): ValidatedJson<RegisterUser>) -> String {
///     format!("Registering: {}", payload.username())
/// }
///
/// let app = Router::new().route("/auth/register", post(register));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        data.validate()
            .map_err(|e| AppError::BadRequest(first_message(&e)).into_response())?;

        Ok(ValidatedJson(data))
    }
}

/// Pull the message out of a validation failure.
///
/// Payload validators short-circuit on the first failing rule, so the
/// error set holds exactly one entry.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid values".to_string())
}
