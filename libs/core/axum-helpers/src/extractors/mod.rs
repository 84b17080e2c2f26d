//! Custom extractors for Axum handlers.
//!
//! These standardize request parsing so every handler rejects bad
//! input with the same error shape.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
