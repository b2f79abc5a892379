//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so no database is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> axum::Router {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    handlers::router(service)
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_product_returns_201_with_the_created_product() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "product_name": "widget",
                "product_price": 9.99,
                "stock_available": 3
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "widget");
    assert_eq!(product.price, 9.99);
    assert_eq!(product.stock_available, 3);
}

#[tokio::test]
async fn explicit_id_round_trips_through_the_wire_format() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 1,
                "product_name": "widget",
                "product_price": 9.99,
                "stock_available": 3
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["product_id"], 1);
    assert_eq!(body["product_name"], "widget");
    assert_eq!(body["product_price"], 9.99);
    assert_eq!(body["stock_available"], 3);
}

#[tokio::test]
async fn duplicate_name_returns_409_and_keeps_a_single_row() {
    let app = app();

    let payload = json!({
        "product_name": "widget",
        "product_price": 9.99
    });

    let response = app.clone().oneshot(post_json("/", payload.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(post_json("/", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.oneshot(get("/")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn get_missing_product_returns_404() {
    let response = app().oneshot(get("/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_returns_400() {
    let response = app().oneshot(get("/not-a-number")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_product_validates_input() {
    let response = app()
        .oneshot(post_json(
            "/",
            json!({
                "product_name": "",
                "product_price": 9.99
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_unchanged() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 3,
                "product_name": "widget",
                "product_price": 9.99,
                "stock_available": 7
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(put_json("/3", json!({ "product_price": 12.5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "widget");
    assert_eq!(product.price, 12.5);
    assert_eq!(product.stock_available, 7);
}

#[tokio::test]
async fn delete_product_returns_204_then_404() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 4,
                "product_name": "widget",
                "product_price": 1.0
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_level_can_be_read_and_overwritten() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 5,
                "product_name": "widget",
                "product_price": 1.0,
                "stock_available": 2
            }),
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/5/stock")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stock: Value = json_body(response.into_body()).await;
    assert_eq!(stock["stock_available"], 2);

    let response = app
        .clone()
        .oneshot(put_json("/5/stock", json!({ "stock_available": 11 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/5/stock")).await.unwrap();
    let stock: Value = json_body(response.into_body()).await;
    assert_eq!(stock["stock_available"], 11);
}

#[tokio::test]
async fn negative_stock_level_is_rejected() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 6,
                "product_name": "widget",
                "product_price": 1.0
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(put_json("/6/stock", json!({ "stock_available": -1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn restock_refills_low_stock_to_twice_the_threshold() {
    let app = app();

    // Regression: stock 5 with threshold 20 must become 40, not 30
    app.clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 7,
                "product_name": "low",
                "product_price": 1.0,
                "stock_available": 5
            }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json(
            "/",
            json!({
                "product_id": 8,
                "product_name": "high",
                "product_price": 1.0,
                "stock_available": 50
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/restock", json!({ "threshold": 20 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result: RestockResponse = json_body(response.into_body()).await;
    assert_eq!(result.restocked, 1);

    let response = app.clone().oneshot(get("/7/stock")).await.unwrap();
    let stock: Value = json_body(response.into_body()).await;
    assert_eq!(stock["stock_available"], 40);

    let response = app.oneshot(get("/8/stock")).await.unwrap();
    let stock: Value = json_body(response.into_body()).await;
    assert_eq!(stock["stock_available"], 50);
}
