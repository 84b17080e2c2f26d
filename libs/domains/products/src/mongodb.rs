//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes.
    ///
    /// The unique name index is what actually enforces uniqueness when
    /// two concurrent creates race past the pre-insert check.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_name_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name()))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let filter = doc! { "name": name };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }
}
