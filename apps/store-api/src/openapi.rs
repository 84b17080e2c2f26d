//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "User authentication and product management API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/auth", api = domain_users::ApiDoc),
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Auth", description = "User registration and login"),
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
