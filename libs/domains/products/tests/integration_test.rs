//! Integration tests for the Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Database queries work correctly
//! - Constraints are enforced
//! - The bulk restock statement touches only low-stock rows
//!
//! They require a local Docker daemon and are ignored by default.

use domain_products::*;
use test_utils::{TestDatabase, TestDataBuilder};

fn input(name: String, stock: i32) -> CreateProduct {
    CreateProduct {
        id: None,
        name,
        price: 9.99,
        stock_available: stock,
    }
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("products_create_and_get");

    let created = repo
        .create(input(builder.name("product", "main"), 3))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.price, 9.99);
    assert_eq!(fetched.stock_available, 3);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn duplicate_name_is_rejected_by_the_database_path() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("products_duplicate_name");

    let name = builder.name("product", "main");
    repo.create(input(name.clone(), 0)).await.unwrap();

    let result = repo.create(input(name, 0)).await;
    assert!(matches!(result, Err(ProductError::DuplicateName(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn restock_updates_only_low_stock_rows() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("products_restock");

    let low = repo
        .create(input(builder.name("product", "low"), 5))
        .await
        .unwrap();
    let high = repo
        .create(input(builder.name("product", "high"), 50))
        .await
        .unwrap();

    let restocked = repo.restock_below(20).await.unwrap();
    assert_eq!(restocked, 1);

    let low = repo.get_by_id(low.id).await.unwrap().unwrap();
    assert_eq!(low.stock_available, 40);

    let high = repo.get_by_id(high.id).await.unwrap().unwrap();
    assert_eq!(high.stock_available, 50);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn explicit_id_survives_the_round_trip() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("products_explicit_id");

    let mut create = input(builder.name("product", "main"), 0);
    create.id = Some(1);

    let created = repo.create(create).await.unwrap();
    assert_eq!(created.id, 1);

    let result = repo
        .create(CreateProduct {
            id: Some(1),
            name: builder.name("product", "other"),
            price: 1.0,
            stock_available: 0,
        })
        .await;
    assert!(matches!(result, Err(ProductError::DuplicateId(1))));
}
