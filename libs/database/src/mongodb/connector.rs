use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;
use thiserror::Error;

use crate::common::{retry_with_backoff, RetryConfig};

use super::config::MongoConfig;

#[derive(Debug, Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Failed to connect to MongoDB: {0}")]
    ConnectionFailed(String),
}

/// Connect to MongoDB with just a connection string
pub async fn connect(url: &str) -> Result<Client, MongoError> {
    let client = Client::with_uri_str(url).await?;
    ping(&client).await?;
    Ok(client)
}

/// Connect to MongoDB using a full configuration
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.app_name = config.app_name.clone();
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    let client = Client::with_options(options)?;
    ping(&client).await?;

    tracing::info!(database = %config.database, "Connected to MongoDB");

    Ok(client)
}

/// Connect to MongoDB with retry and exponential backoff
///
/// Useful at startup when the database container may still be coming up.
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: RetryConfig,
) -> Result<Client, MongoError> {
    retry_with_backoff(|| connect_from_config(config), retry_config).await
}

/// Verify the server is reachable by listing database names
async fn ping(client: &Client) -> Result<(), MongoError> {
    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB instance
    async fn test_connect() {
        let client = connect("mongodb://localhost:27017").await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB instance
    async fn test_connect_from_config() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "testdb");
        let client = connect_from_config(&config).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_connect_invalid_url() {
        let result = connect("not-a-mongodb-url").await;
        assert!(result.is_err());
    }
}
