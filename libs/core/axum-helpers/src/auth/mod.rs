//! Authentication and authorization module.
//!
//! This module provides:
//! - JWT token signing and verification
//! - Role-based authorization middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//! use axum_helpers::auth::{require_role, JwtAuth, JwtConfig, RoleGuard};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let jwt = JwtAuth::new(&config);
//!
//! let protected = Router::new()
//!     .route("/admin", get(handler))
//!     .layer(middleware::from_fn_with_state(
//!         RoleGuard::with_roles(jwt, ["ADMIN"]),
//!         require_role,
//!     ));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{Claims, JwtAuth};
pub use middleware::{require_role, RoleGuard};
