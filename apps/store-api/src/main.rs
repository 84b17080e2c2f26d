//! Store API - REST server for user auth and product management

use axum_helpers::server::{create_app, create_router};
use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB
    let mongo_client = database::mongodb::connect_from_config_with_retry(
        &config.mongodb,
        RetryConfig::default(),
    )
    .await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let jwt = JwtAuth::new(&config.jwt);

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
        jwt,
    };

    // Initialize indexes
    api::init_indexes(&state).await?;

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes);

    info!("Starting Store API on port {}", state.config.server.port);

    // Run server with graceful shutdown
    create_app(router, &state.config.server).await?;

    info!("Store API shutdown complete");
    Ok(())
}
