//! HTTP handlers for the Auth API

use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::{AppError, ErrorResponse, JwtAuth, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{LoginUser, RegisterResponse, RegisterUser, TokenResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(schemas(RegisterUser, LoginUser, RegisterResponse, TokenResponse, ErrorResponse)),
    tags(
        (name = "Auth", description = "User registration and login")
    )
)]
pub struct ApiDoc;

/// Shared state for auth handlers: the user service plus the token
/// signer used on successful login.
pub struct AuthState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub jwt: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            jwt: self.jwt.clone(),
        }
    }
}

/// Create the auth router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: JwtAuth) -> Router {
    let state = AuthState {
        service: Arc::new(service),
        jwt,
    };

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> Result<Json<RegisterResponse>, AppError> {
    state.service.register(input).await?;

    Ok(Json(RegisterResponse {
        msg: "Successful registration!".to_string(),
    }))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 401, description = "Unknown username or wrong password", body = ErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginUser>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state.service.login(input).await?;

    let token = state
        .jwt
        .sign(&user.username, user.role.map(|r| r.to_string()))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(TokenResponse { token }))
}
