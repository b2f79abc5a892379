use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// Sea-ORM backed implementation of ProductRepository
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> ProductResult<bool> {
        let mut query = entity::Entity::find().filter(entity::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            query = query.filter(entity::Column::Id.ne(id));
        }

        let exists = query
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
            .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        if let Some(id) = input.id {
            let id_taken = entity::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
                .is_some();

            if id_taken {
                return Err(ProductError::DuplicateId(id));
            }
        }

        if self.exists_by_name(&input.name, None).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        let active_model: entity::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
            .ok_or(ProductError::NotFound(id))?;

        if let Some(ref new_name) = input.name {
            if self.exists_by_name(new_name, Some(id)).await? {
                return Err(ProductError::DuplicateName(new_name.clone()));
            }
        }

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            price: Set(product.price),
            stock_available: Set(product.stock_available),
            updated_at: Set(product.updated_at.into()),
            ..Default::default()
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_stock(&self, id: i64, stock_available: i32) -> ProductResult<Product> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
            .ok_or(ProductError::NotFound(id))?;

        let active_model = entity::ActiveModel {
            id: Set(id),
            stock_available: Set(stock_available),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(updated.into())
    }

    async fn restock_below(&self, threshold: i32) -> ProductResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::StockAvailable, Expr::value(2 * threshold))
            .col_expr(entity::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(entity::Column::StockAvailable.lte(threshold))
            .exec(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(
            threshold,
            restocked = result.rows_affected,
            "Restocked products"
        );
        Ok(result.rows_affected)
    }
}
