//! Handler tests for the Customers domain
//!
//! Verifies status codes, serialization, and the account lifecycle
//! keyed by customer id. Runs against the in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_customers::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// One shared repository behind both routers, mirroring the app wiring
fn app() -> Router {
    let repository = InMemoryCustomerRepository::new();
    let customers = CustomerService::new(repository.clone());
    let accounts = CustomerAccountService::new(repository);

    Router::new()
        .nest("/customers", handlers::customer_router(customers))
        .nest("/customer_accounts", handlers::account_router(accounts))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create_customer(app: &Router, name: &str, email: &str) -> Customer {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/customers",
            Some(json!({
                "name": name,
                "email": email,
                "phone": "555-0100"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn customer_create_and_get_round_trips() {
    let app = app();

    let created = create_customer(&app, "Alice", "alice@example.com").await;

    let response = app
        .oneshot(request("GET", &format!("/customers/{}", created.id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Customer = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn customer_update_replaces_all_fields() {
    let app = app();
    let created = create_customer(&app, "Alice", "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/customers/{}", created.id),
            Some(json!({
                "name": "Alice Smith",
                "email": "alice.smith@example.com",
                "phone": "555-0199"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Customer = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.phone, "555-0199");
}

#[tokio::test]
async fn customer_invalid_email_returns_400() {
    let response = app()
        .oneshot(request(
            "POST",
            "/customers",
            Some(json!({
                "name": "Alice",
                "email": "not-an-email",
                "phone": "555-0100"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_customer_returns_404() {
    let response = app()
        .oneshot(request("GET", "/customers/999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn account_lifecycle_is_keyed_by_customer_id() {
    let app = app();
    let customer = create_customer(&app, "Alice", "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/customer_accounts",
            Some(json!({
                "username": "alice",
                "password": "correct horse battery",
                "customer_id": customer.id
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Fetch by the customer's id, not the account's own id
    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/customer_accounts/{}", customer.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["customer_id"], customer.id);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Replace credentials
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/customer_accounts/{}", customer.id),
            Some(json!({
                "username": "alice2",
                "password": "another long password"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete, then the lookup misses
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/customer_accounts/{}", customer.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/customer_accounts/{}", customer.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn account_for_a_missing_customer_returns_400() {
    let response = app()
        .oneshot(request(
            "POST",
            "/customer_accounts",
            Some(json!({
                "username": "ghost",
                "password": "correct horse battery",
                "customer_id": 999
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn second_account_for_the_same_customer_returns_409() {
    let app = app();
    let customer = create_customer(&app, "Alice", "alice@example.com").await;

    let payload = |username: &str| {
        json!({
            "username": username,
            "password": "correct horse battery",
            "customer_id": customer.id
        })
    };

    let response = app
        .clone()
        .oneshot(request("POST", "/customer_accounts", Some(payload("alice"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request("POST", "/customer_accounts", Some(payload("alice2"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn deleting_a_customer_with_an_account_returns_409() {
    let app = app();
    let customer = create_customer(&app, "Alice", "alice@example.com").await;

    app.clone()
        .oneshot(request(
            "POST",
            "/customer_accounts",
            Some(json!({
                "username": "alice",
                "password": "correct horse battery",
                "customer_id": customer.id
            })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/customers/{}", customer.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Removing the account unblocks the delete
    app.clone()
        .oneshot(request(
            "DELETE",
            &format!("/customer_accounts/{}", customer.id),
            None,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/customers/{}", customer.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
