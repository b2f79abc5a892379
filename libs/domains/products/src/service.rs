use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, RestockRequest, RestockResponse, StockLevel, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Partially update a product
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// Get the stock level of a product
    pub async fn get_stock(&self, id: i64) -> ProductResult<StockLevel> {
        let product = self.get_product(id).await?;
        Ok(StockLevel {
            stock_available: product.stock_available,
        })
    }

    /// Overwrite the stock level of a product
    pub async fn set_stock(&self, id: i64, input: StockLevel) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.set_stock(id, input.stock_available).await
    }

    /// Refill every product at or below the threshold to twice the
    /// threshold
    pub async fn restock(&self, input: RestockRequest) -> ProductResult<RestockResponse> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let restocked = self.repository.restock_below(input.threshold).await?;

        Ok(RestockResponse {
            restocked,
            threshold: input.threshold,
        })
    }
}
