//! Shared Axum building blocks: the application error type, request
//! extractors, JWT auth, and server bootstrap helpers.

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export commonly used types
pub use auth::{require_role, Claims, JwtAuth, JwtConfig, RoleGuard};
pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use server::{create_app, create_router, shutdown_signal};
