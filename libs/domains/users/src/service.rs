//! User Service - Business logic layer

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginUser, RegisterUser, Role, User};
use crate::repository::UserRepository;

/// Argon2 cost parameters for password hashing.
///
/// Defaults to the argon2 crate's recommended parameters. The time
/// cost can be tuned down via configuration for faster hashing on
/// constrained environments.
#[derive(Debug, Clone, Copy)]
pub struct HashCost {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_cost: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    pub fn with_time_cost(time_cost: u32) -> Self {
        Self {
            time_cost,
            ..Default::default()
        }
    }
}

/// User service providing registration and login.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hash_cost: HashCost,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with default hashing cost
    pub fn new(repository: R) -> Self {
        Self::with_hash_cost(repository, HashCost::default())
    }

    /// Create a new UserService with explicit hashing cost
    pub fn with_hash_cost(repository: R, hash_cost: HashCost) -> Self {
        Self {
            repository: Arc::new(repository),
            hash_cost,
        }
    }

    /// Register a new user.
    ///
    /// The first user ever registered is promoted to the ADMIN role.
    /// The existence check here is best-effort; the unique index on
    /// `username` is the real guard under concurrency.
    #[instrument(skip(self, input), fields(username = %input.username()))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(first_rule_message(&e)))?;

        let username = input.username().to_string();

        if self.repository.username_exists(&username).await? {
            return Err(UserError::DuplicateUsername(username));
        }

        let password_hash = self.hash_password(input.password())?;

        let role = if self.repository.count().await? == 0 {
            Some(Role::Admin)
        } else {
            None
        };

        let user = self
            .repository
            .create(User::new(username, password_hash, role))
            .await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "User registered");
        Ok(user)
    }

    /// Authenticate a user by username and password.
    ///
    /// An unknown username and a wrong password both surface as
    /// `InvalidCredentials` so the caller cannot enumerate accounts.
    #[instrument(skip(self, input), fields(username = %input.username()))]
    pub async fn login(&self, input: LoginUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(first_rule_message(&e)))?;

        let user = self
            .repository
            .get_by_username(input.username())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.verify_password(input.password(), &user.password_hash)?;

        Ok(user)
    }

    fn hasher(&self) -> UserResult<Argon2<'static>> {
        let params = Params::new(
            self.hash_cost.memory_cost,
            self.hash_cost.time_cost,
            self.hash_cost.parallelism,
            None,
        )
        .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<()> {
        let parsed = PasswordHash::new(hash).map_err(|_| UserError::InvalidCredentials)?;

        self.hasher()?
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| UserError::InvalidCredentials)
    }
}

fn first_rule_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid values".to_string())
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hash_cost: self.hash_cost,
        }
    }
}
