//! Health check endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "store-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn ready(state: AppState) -> Json<HealthResponse> {
    let status = if database::mongodb::check_health(&state.mongo_client).await {
        "ready"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        service: "store-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(move || ready(state)))
}
