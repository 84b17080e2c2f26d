use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Users are append-only in this system: they are created on register
/// and read on login, never updated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> UserResult<bool>;

    /// Count all users
    async fn count(&self) -> UserResult<u64>;
}
