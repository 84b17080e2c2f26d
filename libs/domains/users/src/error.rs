use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with username '{0}' already exists")]
    DuplicateUsername(String),

    // Covers both an unknown username and a wrong password so the
    // response never reveals which one failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername(username) => AppError::Duplicate {
                resource: "user",
                field: "username",
                value: username,
            },
            UserError::InvalidCredentials => AppError::Unauthenticated,
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::Internal(msg),
            UserError::Token(msg) => AppError::Internal(msg),
            UserError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
