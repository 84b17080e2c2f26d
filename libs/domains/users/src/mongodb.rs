//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Initialize indexes.
    ///
    /// The unique username index is what actually enforces uniqueness
    /// under concurrent registrations; the pre-insert existence check
    /// in the service is best-effort.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_username_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let filter = doc! { "username": username };
        let user = self.collection.find_one(filter).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let filter = doc! { "username": username };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> UserResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
