use utoipa::OpenApi;

/// Combined OpenAPI documentation for the storefront API.
///
/// Each domain crate ships its own `ApiDoc`; they are nested here under
/// the same paths the routers are mounted on.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "API for managing products, customers, customer accounts, and orders"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_products::handlers::ApiDoc),
        (path = "/customers", api = domain_customers::handlers::CustomerApiDoc),
        (path = "/customer_accounts", api = domain_customers::handlers::AccountApiDoc),
        (path = "/orders", api = domain_orders::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
