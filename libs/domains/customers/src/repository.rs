use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{AccountError, AccountResult, CustomerError, CustomerResult};
use crate::models::{
    AccountChanges, CreateCustomer, Customer, CustomerAccount, NewAccount, UpdateCustomer,
};

/// Repository trait for Customer persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create a new customer
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer>;

    /// Get a customer by ID
    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>>;

    /// List all customers
    async fn list(&self) -> CustomerResult<Vec<Customer>>;

    /// Replace a customer's details
    async fn update(&self, id: i64, input: UpdateCustomer) -> CustomerResult<Customer>;

    /// Delete a customer; fails with `Referenced` while orders or an
    /// account still point at it
    async fn delete(&self, id: i64) -> CustomerResult<bool>;
}

/// Repository trait for CustomerAccount persistence, keyed by the
/// owning customer's id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerAccountRepository: Send + Sync {
    /// List all accounts
    async fn list(&self) -> AccountResult<Vec<CustomerAccount>>;

    /// Get the account owned by a customer
    async fn get_by_customer(&self, customer_id: i64) -> AccountResult<Option<CustomerAccount>>;

    /// Create an account for a customer
    async fn create(&self, input: NewAccount) -> AccountResult<CustomerAccount>;

    /// Replace the credentials of a customer's account
    async fn update_by_customer(
        &self,
        customer_id: i64,
        changes: AccountChanges,
    ) -> AccountResult<CustomerAccount>;

    /// Delete the account owned by a customer
    async fn delete_by_customer(&self, customer_id: i64) -> AccountResult<bool>;
}

#[derive(Debug, Clone)]
struct AccountRecord {
    id: i64,
    username: String,
    #[allow(dead_code)]
    password_hash: String,
    customer_id: i64,
}

impl From<&AccountRecord> for CustomerAccount {
    fn from(record: &AccountRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            customer_id: record.customer_id,
        }
    }
}

/// In-memory implementation of both customer repositories (for
/// development/testing). Clones share the same underlying maps, so a
/// customer service and an account service can be wired from one
/// instance.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<i64, Customer>>>,
    // keyed by customer_id; one account per customer
    accounts: Arc<RwLock<HashMap<i64, AccountRecord>>>,
    next_customer_id: Arc<AtomicI64>,
    next_account_id: Arc<AtomicI64>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: Arc::new(RwLock::new(HashMap::new())),
            accounts: Arc::new(RwLock::new(HashMap::new())),
            next_customer_id: Arc::new(AtomicI64::new(1)),
            next_account_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;

        let id = self.next_customer_id.fetch_add(1, Ordering::SeqCst);
        let customer = Customer::new(id, input);
        customers.insert(customer.id, customer.clone());

        tracing::info!(customer_id = customer.id, "Created customer");
        Ok(customer)
    }

    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn list(&self) -> CustomerResult<Vec<Customer>> {
        let customers = self.customers.read().await;
        let mut result: Vec<Customer> = customers.values().cloned().collect();
        result.sort_by_key(|c| c.id);
        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateCustomer) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;

        let customer = customers.get_mut(&id).ok_or(CustomerError::NotFound(id))?;
        customer.apply_update(input);
        let updated = customer.clone();

        tracing::info!(customer_id = id, "Updated customer");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> CustomerResult<bool> {
        let accounts = self.accounts.read().await;
        if accounts.contains_key(&id) {
            return Err(CustomerError::Referenced(id));
        }
        drop(accounts);

        let mut customers = self.customers.write().await;
        if customers.remove(&id).is_some() {
            tracing::info!(customer_id = id, "Deleted customer");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[async_trait]
impl CustomerAccountRepository for InMemoryCustomerRepository {
    async fn list(&self) -> AccountResult<Vec<CustomerAccount>> {
        let accounts = self.accounts.read().await;
        let mut result: Vec<CustomerAccount> = accounts.values().map(|r| r.into()).collect();
        result.sort_by_key(|a| a.id);
        Ok(result)
    }

    async fn get_by_customer(&self, customer_id: i64) -> AccountResult<Option<CustomerAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&customer_id).map(|r| r.into()))
    }

    async fn create(&self, input: NewAccount) -> AccountResult<CustomerAccount> {
        let customers = self.customers.read().await;
        if !customers.contains_key(&input.customer_id) {
            return Err(AccountError::CustomerMissing(input.customer_id));
        }
        drop(customers);

        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&input.customer_id) {
            return Err(AccountError::AlreadyExists(input.customer_id));
        }

        let username_taken = accounts.values().any(|r| r.username == input.username);
        if username_taken {
            return Err(AccountError::DuplicateUsername(input.username));
        }

        let record = AccountRecord {
            id: self.next_account_id.fetch_add(1, Ordering::SeqCst),
            username: input.username,
            password_hash: input.password_hash,
            customer_id: input.customer_id,
        };
        let account = CustomerAccount::from(&record);
        accounts.insert(record.customer_id, record);

        tracing::info!(customer_id = account.customer_id, "Created customer account");
        Ok(account)
    }

    async fn update_by_customer(
        &self,
        customer_id: i64,
        changes: AccountChanges,
    ) -> AccountResult<CustomerAccount> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&customer_id) {
            return Err(AccountError::NotFound(customer_id));
        }

        let username_taken = accounts
            .values()
            .any(|r| r.customer_id != customer_id && r.username == changes.username);
        if username_taken {
            return Err(AccountError::DuplicateUsername(changes.username));
        }

        let record = accounts
            .get_mut(&customer_id)
            .ok_or(AccountError::NotFound(customer_id))?;
        record.username = changes.username;
        record.password_hash = changes.password_hash;
        let account = CustomerAccount::from(&*record);

        tracing::info!(customer_id, "Updated customer account");
        Ok(account)
    }

    async fn delete_by_customer(&self, customer_id: i64) -> AccountResult<bool> {
        let mut accounts = self.accounts.write().await;

        if accounts.remove(&customer_id).is_some() {
            tracing::info!(customer_id, "Deleted customer account");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CreateCustomer {
        CreateCustomer {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn account_for(customer_id: i64, username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            customer_id,
        }
    }

    #[tokio::test]
    async fn create_and_get_customer() {
        let repo = InMemoryCustomerRepository::new();

        let customer = CustomerRepository::create(&repo, alice()).await.unwrap();
        let fetched = repo.get_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[tokio::test]
    async fn account_requires_an_existing_customer() {
        let repo = InMemoryCustomerRepository::new();

        let result = CustomerAccountRepository::create(&repo, account_for(99, "alice")).await;
        assert!(matches!(result, Err(AccountError::CustomerMissing(99))));
    }

    #[tokio::test]
    async fn one_account_per_customer() {
        let repo = InMemoryCustomerRepository::new();
        let customer = CustomerRepository::create(&repo, alice()).await.unwrap();

        CustomerAccountRepository::create(&repo, account_for(customer.id, "alice"))
            .await
            .unwrap();

        let result =
            CustomerAccountRepository::create(&repo, account_for(customer.id, "alice2")).await;
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let repo = InMemoryCustomerRepository::new();
        let first = CustomerRepository::create(&repo, alice()).await.unwrap();
        let second = CustomerRepository::create(
            &repo,
            CreateCustomer {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                phone: "555-0101".to_string(),
            },
        )
        .await
        .unwrap();

        CustomerAccountRepository::create(&repo, account_for(first.id, "shared"))
            .await
            .unwrap();

        let result =
            CustomerAccountRepository::create(&repo, account_for(second.id, "shared")).await;
        assert!(matches!(result, Err(AccountError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn deleting_a_customer_with_an_account_is_a_conflict() {
        let repo = InMemoryCustomerRepository::new();
        let customer = CustomerRepository::create(&repo, alice()).await.unwrap();

        CustomerAccountRepository::create(&repo, account_for(customer.id, "alice"))
            .await
            .unwrap();

        let result = CustomerRepository::delete(&repo, customer.id).await;
        assert!(matches!(result, Err(CustomerError::Referenced(_))));

        // After the account is removed the customer can go
        CustomerAccountRepository::delete_by_customer(&repo, customer.id)
            .await
            .unwrap();
        assert!(CustomerRepository::delete(&repo, customer.id).await.unwrap());
    }
}
