//! Users Domain
//!
//! Registration and login over MongoDB, layered the same way as the
//! products domain: handlers -> service -> repository -> models.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, mongodb::MongoUserRepository, service::UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoUserRepository::new(&db);
//! let service = UserService::new(repository);
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!!"));
//!
//! let router = handlers::router(service, jwt);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState};
pub use models::{LoginUser, RegisterResponse, RegisterUser, Role, TokenResponse, User};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::{HashCost, UserService};
