use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Find a product by its exact name
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Update an existing product, merging the provided fields
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
