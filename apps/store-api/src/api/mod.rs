//! API routes module

pub mod auth;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    auth::init_indexes(state).await?;
    products::init_indexes(state).await
}
