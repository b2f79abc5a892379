use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Statement, TransactionTrait,
};
use std::collections::HashMap;

use crate::{
    entity::{order, order_product},
    error::{OrderError, OrderResult},
    models::{CreateOrder, Order},
    repository::OrderRepository,
};

/// Sea-ORM backed implementation of OrderRepository
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Existence probe against a table owned by a sibling domain
    async fn row_exists(&self, table: &str, id: i64) -> OrderResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1) AS present", table),
            [id.into()],
        );

        let row = self
            .db
            .query_one_raw(stmt)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?
            .ok_or_else(|| OrderError::Internal("Existence query returned no rows".to_string()))?;

        row.try_get::<bool>("", "present")
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))
    }

    /// Collect product ids for a set of orders, grouped by order id
    async fn product_ids_for(&self, order_ids: &[i64]) -> OrderResult<HashMap<i64, Vec<i64>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = order_product::Entity::find()
            .filter(order_product::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(order_product::Column::ProductId)
            .all(&self.db)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row.product_id);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, input: CreateOrder) -> OrderResult<Order> {
        if !self.row_exists("customers", input.customer_id).await? {
            return Err(OrderError::CustomerMissing(input.customer_id));
        }

        for product_id in &input.product_ids {
            if !self.row_exists("products", *product_id).await? {
                return Err(OrderError::ProductMissing(*product_id));
            }
        }

        // Order row and join rows go in together
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        let active_model: order::ActiveModel = (&input).into();
        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        if !input.product_ids.is_empty() {
            let join_rows = input.product_ids.iter().map(|product_id| {
                order_product::ActiveModel {
                    order_id: Set(model.id),
                    product_id: Set(*product_id),
                }
            });

            order_product::Entity::insert_many(join_rows)
                .exec(&txn)
                .await
                .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;
        }

        txn.commit()
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(order_id = model.id, "Created order");
        Ok(model.into_order(input.product_ids))
    }

    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        let model = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let mut grouped = self.product_ids_for(&[model.id]).await?;
        let product_ids = grouped.remove(&model.id).unwrap_or_default();

        Ok(Some(model.into_order(product_ids)))
    }

    async fn list(&self) -> OrderResult<Vec<Order>> {
        let models = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        let order_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut grouped = self.product_ids_for(&order_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let product_ids = grouped.remove(&m.id).unwrap_or_default();
                m.into_order(product_ids)
            })
            .collect())
    }

    async fn list_by_customer(&self, customer_id: i64) -> OrderResult<Vec<Order>> {
        let models = order::Entity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| OrderError::Internal(format!("Database error: {}", e)))?;

        let order_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut grouped = self.product_ids_for(&order_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let product_ids = grouped.remove(&m.id).unwrap_or_default();
                m.into_order(product_ids)
            })
            .collect())
    }
}
