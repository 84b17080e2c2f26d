//! MongoDB connector library
//!
//! Provides connection management for the document store shared by the
//! domain crates: configuration from environment variables, connection
//! establishment with retry, and a lightweight health check.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{connect_from_config, MongoConfig};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{retry, retry_with_backoff, RetryConfig};
