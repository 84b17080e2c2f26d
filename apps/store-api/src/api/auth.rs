//! Auth API routes

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::with_hash_cost(repository, state.config.hash);
    handlers::router(service, state.jwt.clone())
}

/// Initialize user indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
