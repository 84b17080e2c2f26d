use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name, unique across all products
    pub name: String,
    /// Product cost
    pub cost: f64,
}

/// DTO for creating a product. Also the body of a full update (PUT),
/// which requires the same complete set of fields.
///
/// `name` defaults to empty and `cost` to `None` so an absent field
/// trips its presence rule instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    pub name: String,
    pub cost: Option<f64>,
}

impl CreateProduct {
    pub fn name(&self) -> &str {
        self.name.trim()
    }
}

/// DTO for a partial update (PATCH). Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub cost: Option<f64>,
}

impl UpdateProduct {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim)
    }
}

impl Product {
    /// Create a new product from a validated CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name().to_string(),
            // Presence is checked by validation before this point.
            cost: input.cost.unwrap_or_default(),
        }
    }

    /// Apply a partial update, merging only the provided fields
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name() {
            self.name = name.to_string();
        }
        if let Some(cost) = update.cost {
            self.cost = cost;
        }
    }
}

fn rule_failure(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code).with_message(Cow::from(message)));
    errors
}

impl Validate for CreateProduct {
    // Rules run in declared order: name presence, cost presence. A
    // non-numeric cost never reaches validation; it fails JSON
    // deserialization first.
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.name().is_empty() {
            return Err(rule_failure("name", "required", "Name missing"));
        }
        if self.cost.is_none() {
            return Err(rule_failure("cost", "required", "Cost missing"));
        }
        Ok(())
    }
}

impl Validate for UpdateProduct {
    // Provided fields must pass the create rules; omitted ones are fine.
    fn validate(&self) -> Result<(), ValidationErrors> {
        if let Some(name) = self.name() {
            if name.is_empty() {
                return Err(rule_failure("name", "required", "Name missing"));
            }
        }
        Ok(())
    }
}
