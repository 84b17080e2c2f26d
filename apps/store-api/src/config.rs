//! Configuration for Store API

use axum_helpers::JwtConfig;
use core_config::{server::ServerConfig, FromEnv};
use database::mongodb::MongoConfig;
use domain_users::HashCost;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub hash: HashCost,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        // Optional override for the password-hashing time cost, mainly
        // useful to speed up local runs.
        let hash = std::env::var("HASH_TIME_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(HashCost::with_time_cost)
            .unwrap_or_default();

        Ok(Self {
            mongodb,
            jwt,
            hash,
            server,
            environment,
        })
    }
}
