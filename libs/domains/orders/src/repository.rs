use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order};

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create a new order after verifying that the customer and every
    /// referenced product exist
    async fn create(&self, input: CreateOrder) -> OrderResult<Order>;

    /// Get an order by ID, including its product ids
    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>>;

    /// List all orders
    async fn list(&self) -> OrderResult<Vec<Order>>;

    /// List all orders placed by one customer
    async fn list_by_customer(&self, customer_id: i64) -> OrderResult<Vec<Order>>;
}

/// In-memory implementation of OrderRepository (for development/
/// testing). Customers and products live in sibling domains, so the
/// referenced ids are registered explicitly.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<i64, Order>>>,
    known_customers: Arc<RwLock<HashSet<i64>>>,
    known_products: Arc<RwLock<HashSet<i64>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            known_customers: Arc::new(RwLock::new(HashSet::new())),
            known_products: Arc::new(RwLock::new(HashSet::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Register a customer id that create() will accept
    pub async fn register_customer(&self, id: i64) {
        self.known_customers.write().await.insert(id);
    }

    /// Register a product id that create() will accept
    pub async fn register_product(&self, id: i64) {
        self.known_products.write().await.insert(id);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, input: CreateOrder) -> OrderResult<Order> {
        let customers = self.known_customers.read().await;
        if !customers.contains(&input.customer_id) {
            return Err(OrderError::CustomerMissing(input.customer_id));
        }
        drop(customers);

        let products = self.known_products.read().await;
        for product_id in &input.product_ids {
            if !products.contains(product_id) {
                return Err(OrderError::ProductMissing(*product_id));
            }
        }
        drop(products);

        let mut orders = self.orders.write().await;
        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            date: input.date,
            customer_id: input.customer_id,
            product_ids: input.product_ids,
            created_at: chrono::Utc::now(),
        };
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = order.id, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list(&self) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders.values().cloned().collect();
        result.sort_by_key(|o| o.id);
        Ok(result)
    }

    async fn list_by_customer(&self, customer_id: i64) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        result.sort_by_key(|o| o.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order_on(day: u32, customer_id: i64, product_ids: Vec<i64>) -> CreateOrder {
        CreateOrder {
            date: NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
            customer_id,
            product_ids,
        }
    }

    async fn seeded_repo() -> InMemoryOrderRepository {
        let repo = InMemoryOrderRepository::new();
        repo.register_customer(1).await;
        repo.register_product(10).await;
        repo.register_product(11).await;
        repo
    }

    #[tokio::test]
    async fn create_persists_the_product_association() {
        let repo = seeded_repo().await;

        let order = repo.create(order_on(1, 1, vec![10, 11])).await.unwrap();
        let fetched = repo.get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(fetched.product_ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected() {
        let repo = seeded_repo().await;

        let result = repo.create(order_on(1, 99, vec![10])).await;
        assert!(matches!(result, Err(OrderError::CustomerMissing(99))));
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let repo = seeded_repo().await;

        let result = repo.create(order_on(1, 1, vec![10, 999])).await;
        assert!(matches!(result, Err(OrderError::ProductMissing(999))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_by_customer_filters_other_customers() {
        let repo = seeded_repo().await;
        repo.register_customer(2).await;

        repo.create(order_on(1, 1, vec![10])).await.unwrap();
        repo.create(order_on(2, 2, vec![11])).await.unwrap();
        repo.create(order_on(3, 1, vec![])).await.unwrap();

        let orders = repo.list_by_customer(1).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.customer_id == 1));
    }
}
