//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation, uniqueness and existence
/// checks, and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name()))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(first_rule_message(&e)))?;

        if self.repository.find_by_name(input.name()).await?.is_some() {
            return Err(ProductError::DuplicateName(input.name().to_string()));
        }

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Fully replace a product's fields (PUT semantics).
    ///
    /// Requires the complete set of fields, so it takes the same DTO
    /// as create.
    #[instrument(skip(self, input))]
    pub async fn replace_product(&self, id: Uuid, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(first_rule_message(&e)))?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.check_name_available(input.name(), id).await?;

        let update = UpdateProduct {
            name: Some(input.name().to_string()),
            cost: input.cost,
        };
        self.repository.update(id, update).await
    }

    /// Partially update a product (PATCH semantics), merging only the
    /// provided fields.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(first_rule_message(&e)))?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        if let Some(name) = input.name() {
            self.check_name_available(name, id).await?;
        }

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Reject a name already held by a *different* product. Keeping
    /// the same name on the record being updated is a no-op rename
    /// and stays allowed.
    async fn check_name_available(&self, name: &str, current_id: Uuid) -> ProductResult<()> {
        if let Some(other) = self.repository.find_by_name(name).await? {
            if other.id != current_id {
                return Err(ProductError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
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

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn product(name: &str, cost: f64) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: name.to_string(),
            cost,
        }
    }

    fn create_input(name: &str, cost: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            cost: Some(cost),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name_rejected_without_insert() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_name()
            .withf(|name| name == "Widget")
            .times(1)
            .returning(|name| Ok(Some(product(name, 9.5))));
        repo.expect_create().times(0);

        let result = ProductService::new(repo)
            .create_product(create_input("Widget", 4.0))
            .await;
        assert!(matches!(result, Err(ProductError::DuplicateName(name)) if name == "Widget"));
    }

    #[tokio::test]
    async fn test_create_missing_cost_never_touches_store() {
        let repo = MockProductRepository::new();

        let input = CreateProduct {
            name: "Widget".to_string(),
            cost: None,
        };
        let result = ProductService::new(repo).create_product(input).await;
        match result {
            Err(ProductError::Validation(msg)) => assert_eq!(msg, "Cost missing"),
            other => panic!("expected Validation, got {:?}", other.map(|p| p.name)),
        }
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let created = ProductService::new(repo)
            .create_product(create_input("Widget", 9.5))
            .await
            .unwrap();
        assert_eq!(created.name, "Widget");
        assert_eq!(created.cost, 9.5);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let id = Uuid::now_v7();
        let result = ProductService::new(repo).get_product(id).await;
        assert!(matches!(result, Err(ProductError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn test_replace_keeping_own_name_is_allowed() {
        let existing = product("Widget", 9.5);
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        let for_get = existing.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(for_get.clone())));
        let for_find = existing.clone();
        repo.expect_find_by_name()
            .withf(|name| name == "Widget")
            .returning(move |_| Ok(Some(for_find.clone())));
        repo.expect_update()
            .withf(move |got_id, update| {
                *got_id == id
                    && update.name.as_deref() == Some("Widget")
                    && update.cost == Some(4.0)
            })
            .times(1)
            .returning(|_, update| {
                let mut p = product("Widget", 9.5);
                p.apply_update(update);
                Ok(p)
            });

        let updated = ProductService::new(repo)
            .replace_product(id, create_input("Widget", 4.0))
            .await
            .unwrap();
        assert_eq!(updated.cost, 4.0);
    }

    #[tokio::test]
    async fn test_replace_renaming_onto_other_product_conflicts() {
        let existing = product("Widget", 9.5);
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_name()
            .withf(|name| name == "Gadget")
            .returning(|name| Ok(Some(product(name, 2.0))));
        repo.expect_update().times(0);

        let result = ProductService::new(repo)
            .replace_product(id, create_input("Gadget", 4.0))
            .await;
        assert!(matches!(result, Err(ProductError::DuplicateName(name)) if name == "Gadget"));
    }

    #[tokio::test]
    async fn test_patch_cost_only_skips_name_check() {
        let existing = product("Widget", 9.5);
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_name().times(0);
        repo.expect_update()
            .withf(|_, update| update.name.is_none() && update.cost == Some(5.0))
            .times(1)
            .returning(|_, update| {
                let mut p = product("Widget", 9.5);
                p.apply_update(update);
                Ok(p)
            });

        let updated = ProductService::new(repo)
            .update_product(
                id,
                UpdateProduct {
                    name: None,
                    cost: Some(5.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.cost, 5.0);
    }

    #[tokio::test]
    async fn test_patch_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let id = Uuid::now_v7();
        let result = ProductService::new(repo)
            .update_product(id, UpdateProduct::default())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let id = Uuid::now_v7();
        let result = ProductService::new(repo).delete_product(id).await;
        assert!(matches!(result, Err(ProductError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(true));

        assert!(ProductService::new(repo)
            .delete_product(Uuid::now_v7())
            .await
            .is_ok());
    }
}
