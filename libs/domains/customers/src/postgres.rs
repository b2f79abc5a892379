use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Statement,
};

use crate::{
    entity::{account, customer},
    error::{AccountError, AccountResult, CustomerError, CustomerResult},
    models::{
        AccountChanges, CreateCustomer, Customer, CustomerAccount, NewAccount, UpdateCustomer,
    },
    repository::{CustomerAccountRepository, CustomerRepository},
};

/// Sea-ORM backed implementation of both customer repositories
#[derive(Clone)]
pub struct PgCustomerRepository {
    db: DatabaseConnection,
}

impl PgCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count orders referencing a customer. The orders table belongs
    /// to a sibling domain, so this goes through a raw statement
    /// instead of its entity.
    async fn order_count(&self, customer_id: i64) -> CustomerResult<i64> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*) AS cnt FROM orders WHERE customer_id = $1",
            [customer_id.into()],
        );

        let row = self
            .db
            .query_one_raw(stmt)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?
            .ok_or_else(|| CustomerError::Internal("Count query returned no rows".to_string()))?;

        row.try_get::<i64>("", "cnt")
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        let active_model: customer::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(customer_id = model.id, "Created customer");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> CustomerResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateCustomer) -> CustomerResult<Customer> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?
            .ok_or(CustomerError::NotFound(id))?;

        let mut domain: Customer = model.into();
        domain.apply_update(input);

        let active_model = customer::ActiveModel {
            id: Set(domain.id),
            name: Set(domain.name.clone()),
            email: Set(domain.email.clone()),
            phone: Set(domain.phone.clone()),
            updated_at: Set(domain.updated_at.into()),
            ..Default::default()
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(customer_id = id, "Updated customer");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> CustomerResult<bool> {
        // Surface referential integrity as a conflict before the FK
        // would turn it into a 500
        let has_account = account::Entity::find()
            .filter(account::Column::CustomerId.eq(id))
            .one(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?
            .is_some();

        if has_account || self.order_count(id).await? > 0 {
            return Err(CustomerError::Referenced(id));
        }

        let result = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CustomerError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(customer_id = id, "Deleted customer");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl CustomerAccountRepository for PgCustomerRepository {
    async fn list(&self) -> AccountResult<Vec<CustomerAccount>> {
        let models = account::Entity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_customer(&self, customer_id: i64) -> AccountResult<Option<CustomerAccount>> {
        let model = account::Entity::find()
            .filter(account::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn create(&self, input: NewAccount) -> AccountResult<CustomerAccount> {
        let customer_exists = customer::Entity::find_by_id(input.customer_id)
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?
            .is_some();

        if !customer_exists {
            return Err(AccountError::CustomerMissing(input.customer_id));
        }

        if self.get_by_customer(input.customer_id).await?.is_some() {
            return Err(AccountError::AlreadyExists(input.customer_id));
        }

        let username_taken = account::Entity::find()
            .filter(account::Column::Username.eq(&input.username))
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?
            .is_some();

        if username_taken {
            return Err(AccountError::DuplicateUsername(input.username));
        }

        let customer_id = input.customer_id;
        let active_model: account::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(customer_id, "Created customer account");
        Ok(model.into())
    }

    async fn update_by_customer(
        &self,
        customer_id: i64,
        changes: AccountChanges,
    ) -> AccountResult<CustomerAccount> {
        let model = account::Entity::find()
            .filter(account::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?
            .ok_or(AccountError::NotFound(customer_id))?;

        let username_taken = account::Entity::find()
            .filter(account::Column::Username.eq(&changes.username))
            .filter(account::Column::Id.ne(model.id))
            .one(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?
            .is_some();

        if username_taken {
            return Err(AccountError::DuplicateUsername(changes.username));
        }

        let active_model = account::ActiveModel {
            id: Set(model.id),
            username: Set(changes.username),
            password_hash: Set(changes.password_hash),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(customer_id, "Updated customer account");
        Ok(updated.into())
    }

    async fn delete_by_customer(&self, customer_id: i64) -> AccountResult<bool> {
        let result = account::Entity::delete_many()
            .filter(account::Column::CustomerId.eq(customer_id))
            .exec(&self.db)
            .await
            .map_err(|e| AccountError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(customer_id, "Deleted customer account");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
