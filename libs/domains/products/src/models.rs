use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity - a catalog item with a stock level.
///
/// Wire field names keep the public API shape (`product_id`,
/// `product_name`, `product_price`, `stock_available`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    #[serde(rename = "product_id")]
    pub id: i64,
    /// Product name (unique across the catalog)
    #[serde(rename = "product_name")]
    pub name: String,
    /// Unit price in the store currency
    #[serde(rename = "product_price")]
    pub price: f64,
    /// Units currently in stock
    pub stock_available: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// Explicit id; auto-assigned when omitted
    #[serde(rename = "product_id")]
    #[validate(range(min = 1))]
    pub id: Option<i64>,
    #[serde(rename = "product_name")]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "product_price")]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_available: i32,
}

/// DTO for partially updating a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(rename = "product_name")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(rename = "product_price")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock_available: Option<i32>,
}

/// Stock level of a single product; doubles as the PUT stock payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StockLevel {
    #[validate(range(min = 0))]
    pub stock_available: i32,
}

/// Bulk restock request: every product at or below `threshold` is
/// refilled to `2 * threshold`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RestockRequest {
    #[validate(range(min = 0))]
    pub threshold: i32,
}

/// Result of a bulk restock
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestockResponse {
    /// Number of products that were refilled
    pub restocked: u64,
    pub threshold: i32,
}

impl Product {
    /// Create a new product from CreateProduct DTO with an assigned id
    pub fn new(id: i64, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            stock_available: input.stock_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock_available {
            self.stock_available = stock;
        }
        self.updated_at = Utc::now();
    }
}
