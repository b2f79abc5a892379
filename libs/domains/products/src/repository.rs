use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product; an explicit id in the input is honored
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Apply a partial update to an existing product
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Overwrite the stock level of a product
    async fn set_stock(&self, id: i64, stock_available: i32) -> ProductResult<Product>;

    /// Refill every product with stock at or below `threshold` to
    /// `2 * threshold`; returns how many rows changed
    async fn restock_below(&self, threshold: i32) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(id) => {
                // Keep the counter ahead of explicitly assigned ids
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if let Some(id) = input.id {
            if products.contains_key(&id) {
                return Err(ProductError::DuplicateId(id));
            }
        }

        // Byte-exact comparison, matching the unique index on name
        let name_exists = products.values().any(|p| p.name == input.name);
        if name_exists {
            return Err(ProductError::DuplicateName(input.name));
        }

        let id = self.allocate_id(input.id);
        let product = Product::new(id, input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&id) {
            return Err(ProductError::NotFound(id));
        }

        if let Some(ref new_name) = input.name {
            let name_exists = products
                .values()
                .any(|p| p.id != id && p.name == *new_name);
            if name_exists {
                return Err(ProductError::DuplicateName(new_name.clone()));
            }
        }

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_stock(&self, id: i64, stock_available: i32) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.stock_available = stock_available;
        product.updated_at = chrono::Utc::now();

        Ok(product.clone())
    }

    async fn restock_below(&self, threshold: i32) -> ProductResult<u64> {
        let mut products = self.products.write().await;

        let mut restocked = 0;
        for product in products.values_mut() {
            if product.stock_available <= threshold {
                product.stock_available = 2 * threshold;
                product.updated_at = chrono::Utc::now();
                restocked += 1;
            }
        }

        tracing::info!(threshold, restocked, "Restocked products");
        Ok(restocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str, stock: i32) -> CreateProduct {
        CreateProduct {
            id: None,
            name: name.to_string(),
            price: 9.99,
            stock_available: stock,
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trips() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("widget", 3)).await.unwrap();
        let fetched = repo.get_by_id(product.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "widget");
        assert_eq!(fetched.price, 9.99);
        assert_eq!(fetched.stock_available, 3);
    }

    #[tokio::test]
    async fn explicit_id_is_honored() {
        let repo = InMemoryProductRepository::new();

        let mut input = widget("widget", 0);
        input.id = Some(1);
        let product = repo.create(input).await.unwrap();
        assert_eq!(product.id, 1);

        // The next auto-assigned id must not collide
        let second = repo.create(widget("gadget", 0)).await.unwrap();
        assert_ne!(second.id, 1);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = InMemoryProductRepository::new();

        let mut input = widget("widget", 0);
        input.id = Some(5);
        repo.create(input).await.unwrap();

        let mut duplicate = widget("other", 0);
        duplicate.id = Some(5);
        let result = repo.create(duplicate).await;
        assert!(matches!(result, Err(ProductError::DuplicateId(5))));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("widget", 0)).await.unwrap();
        let result = repo.create(widget("widget", 0)).await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn name_uniqueness_is_case_sensitive() {
        let repo = InMemoryProductRepository::new();

        // The unique index on name compares bytes, so "Widget" is a
        // distinct product from "widget"
        repo.create(widget("widget", 0)).await.unwrap();
        repo.create(widget("Widget", 0)).await.unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_then_get_reports_not_found() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(widget("widget", 0)).await.unwrap();
        assert!(repo.delete(product.id).await.unwrap());
        assert!(repo.get_by_id(product.id).await.unwrap().is_none());
        assert!(!repo.delete(product.id).await.unwrap());
    }

    #[tokio::test]
    async fn restock_refills_to_twice_the_threshold() {
        let repo = InMemoryProductRepository::new();

        // Regression: stock 5 with threshold 20 refills to 40, not 30
        let low = repo.create(widget("low", 5)).await.unwrap();
        let high = repo.create(widget("high", 50)).await.unwrap();

        let restocked = repo.restock_below(20).await.unwrap();
        assert_eq!(restocked, 1);

        let low = repo.get_by_id(low.id).await.unwrap().unwrap();
        assert_eq!(low.stock_available, 40);

        let high = repo.get_by_id(high.id).await.unwrap().unwrap();
        assert_eq!(high.stock_available, 50);
    }

    #[tokio::test]
    async fn restock_with_no_low_stock_is_a_no_op() {
        let repo = InMemoryProductRepository::new();

        repo.create(widget("widget", 100)).await.unwrap();
        let restocked = repo.restock_below(20).await.unwrap();
        assert_eq!(restocked, 0);
    }
}
