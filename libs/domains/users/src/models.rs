use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// User role. The first registered user is promoted to `Admin`;
/// everyone after that carries no role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
}

/// User entity - represents a credential record stored in MongoDB.
///
/// Users are only ever created; this system never updates or deletes
/// them. Uniqueness on `username` is the single invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

/// DTO for registering a new user.
///
/// Fields default to empty strings so an absent field fails the
/// presence rule rather than deserialization, keeping the error
/// message per-field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "cfmPassword")]
    pub cfm_password: String,
}

impl RegisterUser {
    pub fn username(&self) -> &str {
        self.username.trim()
    }

    pub fn password(&self) -> &str {
        self.password.trim()
    }

    pub fn cfm_password(&self) -> &str {
        self.cfm_password.trim()
    }
}

/// DTO for logging in.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginUser {
    pub fn username(&self) -> &str {
        self.username.trim()
    }

    pub fn password(&self) -> &str {
        self.password.trim()
    }
}

/// Registration success response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub msg: String,
}

/// Login success response carrying the signed bearer token.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Build a validation failure for a single field.
///
/// Rules short-circuit on the first failure, so the error set always
/// holds exactly one entry and which-message-wins stays deterministic.
pub(crate) fn rule_failure(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code).with_message(Cow::from(message)));
    errors
}

impl Validate for RegisterUser {
    // Rules run in declared order: username presence, username length,
    // password presence, password length, confirmation presence,
    // confirmation equality.
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.username().is_empty() {
            return Err(rule_failure("username", "required", "Username missing"));
        }
        if self.username().chars().count() < 8 {
            return Err(rule_failure(
                "username",
                "length",
                "Username needs to be minimally 8 characters long",
            ));
        }
        if self.password().is_empty() {
            return Err(rule_failure("password", "required", "Password missing"));
        }
        if self.password().chars().count() < 8 {
            return Err(rule_failure(
                "password",
                "length",
                "Password needs to be minimally 8 characters long",
            ));
        }
        if self.cfm_password().is_empty() {
            return Err(rule_failure(
                "cfmPassword",
                "required",
                "Confirm Password missing",
            ));
        }
        if self.cfm_password() != self.password() {
            return Err(rule_failure(
                "cfmPassword",
                "must_match",
                "Confirm Password does not match",
            ));
        }
        Ok(())
    }
}

impl Validate for LoginUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.username().is_empty() {
            return Err(rule_failure("username", "required", "Username missing"));
        }
        if self.password().is_empty() {
            return Err(rule_failure("password", "required", "Password missing"));
        }
        Ok(())
    }
}
