//! HTTP handlers for the Products API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct, ErrorResponse)),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, description = "Something went wrong", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product does not exist", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Fully replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateProduct,
    responses(
        (status = 204, description = "Product replaced successfully"),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 404, description = "Product does not exist", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<StatusCode> {
    service.replace_product(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 204, description = "Product updated successfully"),
        (status = 400, description = "Invalid values", body = ErrorResponse),
        (status = 404, description = "Product does not exist", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<StatusCode> {
    service.update_product(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product does not exist", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
