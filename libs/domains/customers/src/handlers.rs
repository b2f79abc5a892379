use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{AccountResult, CustomerResult};
use crate::models::{
    CreateCustomer, CreateCustomerAccount, Customer, CustomerAccount, UpdateCustomer,
    UpdateCustomerAccount,
};
use crate::repository::{CustomerAccountRepository, CustomerRepository};
use crate::service::{CustomerAccountService, CustomerService};

const CUSTOMERS_TAG: &str = "customers";
const ACCOUNTS_TAG: &str = "customer_accounts";

/// OpenAPI documentation for the Customers API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_customers,
        create_customer,
        get_customer,
        update_customer,
        delete_customer,
    ),
    components(
        schemas(Customer, CreateCustomer, UpdateCustomer),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = CUSTOMERS_TAG, description = "Customer management endpoints")
    )
)]
pub struct CustomerApiDoc;

/// OpenAPI documentation for the Customer Accounts API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_accounts,
        create_account,
        get_account,
        update_account,
        delete_account,
    ),
    components(
        schemas(CustomerAccount, CreateCustomerAccount, UpdateCustomerAccount),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ACCOUNTS_TAG, description = "Customer account endpoints, keyed by customer id")
    )
)]
pub struct AccountApiDoc;

/// Create the customer router with all HTTP endpoints
pub fn customer_router<R: CustomerRepository + 'static>(service: CustomerService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .with_state(shared_service)
}

/// Create the customer account router; all item routes are keyed by
/// the owning customer's id
pub fn account_router<R: CustomerAccountRepository + 'static>(
    service: CustomerAccountService<R>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .with_state(shared_service)
}

/// List all customers
#[utoipa::path(
    get,
    path = "",
    tag = CUSTOMERS_TAG,
    responses(
        (status = 200, description = "List of customers", body = Vec<Customer>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_customers<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
) -> CustomerResult<Json<Vec<Customer>>> {
    let customers = service.list_customers().await?;
    Ok(Json(customers))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "",
    tag = CUSTOMERS_TAG,
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created successfully", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> CustomerResult<impl IntoResponse> {
    let customer = service.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get a customer by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CUSTOMERS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
) -> CustomerResult<Json<Customer>> {
    let customer = service.get_customer(id).await?;
    Ok(Json(customer))
}

/// Replace a customer's details
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CUSTOMERS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated successfully", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CustomerResult<Json<Customer>> {
    let customer = service.update_customer(id, input).await?;
    Ok(Json(customer))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CUSTOMERS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CustomerResult<impl IntoResponse> {
    service.delete_customer(id).await?;

    AuditEvent::new(
        None,
        "customer.delete",
        Some(format!("customer:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List all customer accounts
#[utoipa::path(
    get,
    path = "",
    tag = ACCOUNTS_TAG,
    responses(
        (status = 200, description = "List of accounts", body = Vec<CustomerAccount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_accounts<R: CustomerAccountRepository>(
    State(service): State<Arc<CustomerAccountService<R>>>,
) -> AccountResult<Json<Vec<CustomerAccount>>> {
    let accounts = service.list_accounts().await?;
    Ok(Json(accounts))
}

/// Create an account for a customer
#[utoipa::path(
    post,
    path = "",
    tag = ACCOUNTS_TAG,
    request_body = CreateCustomerAccount,
    responses(
        (status = 201, description = "Account created successfully", body = CustomerAccount),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_account<R: CustomerAccountRepository>(
    State(service): State<Arc<CustomerAccountService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCustomerAccount>,
) -> AccountResult<impl IntoResponse> {
    let account = service.create_account(input).await?;

    AuditEvent::new(
        Some(account.customer_id.to_string()),
        "customer_account.create",
        Some(format!("customer:{}", account.customer_id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get the account owned by a customer
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ACCOUNTS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Account found", body = CustomerAccount),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_account<R: CustomerAccountRepository>(
    State(service): State<Arc<CustomerAccountService<R>>>,
    IdPath(id): IdPath,
) -> AccountResult<Json<CustomerAccount>> {
    let account = service.get_account(id).await?;
    Ok(Json(account))
}

/// Replace the credentials of a customer's account
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ACCOUNTS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomerAccount,
    responses(
        (status = 200, description = "Account updated successfully", body = CustomerAccount),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_account<R: CustomerAccountRepository>(
    State(service): State<Arc<CustomerAccountService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomerAccount>,
) -> AccountResult<Json<CustomerAccount>> {
    let account = service.update_account(id, input).await?;

    AuditEvent::new(
        Some(id.to_string()),
        "customer_account.update",
        Some(format!("customer:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(account))
}

/// Delete the account owned by a customer
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ACCOUNTS_TAG,
    params(
        ("id" = i64, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_account<R: CustomerAccountRepository>(
    State(service): State<Arc<CustomerAccountService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> AccountResult<impl IntoResponse> {
    service.delete_account(id).await?;

    AuditEvent::new(
        Some(id.to_string()),
        "customer_account.delete",
        Some(format!("customer:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
