use std::sync::Arc;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order};
use crate::repository::OrderRepository;

/// Service layer for Order business logic
#[derive(Clone)]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Place a new order
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get an order by ID
    pub async fn get_order(&self, id: i64) -> OrderResult<Order> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// List all orders
    pub async fn list_orders(&self) -> OrderResult<Vec<Order>> {
        self.repository.list().await
    }

    /// List all orders placed by one customer
    pub async fn list_customer_orders(&self, customer_id: i64) -> OrderResult<Vec<Order>> {
        self.repository.list_by_customer(customer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockOrderRepository;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_rejects_a_non_positive_customer_id() {
        let mock_repo = MockOrderRepository::new();
        let service = OrderService::new(mock_repo);

        let result = service
            .create_order(CreateOrder {
                date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
                customer_id: 0,
                product_ids: vec![],
            })
            .await;

        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_order_maps_to_not_found() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(8))
            .returning(|_| Ok(None));

        let service = OrderService::new(mock_repo);
        let result = service.get_order(8).await;

        assert!(matches!(result, Err(OrderError::NotFound(8))));
    }

    #[tokio::test]
    async fn missing_product_surfaces_from_the_repository() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(OrderError::ProductMissing(77)));

        let service = OrderService::new(mock_repo);
        let result = service
            .create_order(CreateOrder {
                date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
                customer_id: 1,
                product_ids: vec![77],
            })
            .await;

        assert!(matches!(result, Err(OrderError::ProductMissing(77))));
    }
}
