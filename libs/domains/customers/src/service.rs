use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AccountError, AccountResult, CustomerError, CustomerResult};
use crate::models::{
    AccountChanges, CreateCustomer, CreateCustomerAccount, Customer, CustomerAccount, NewAccount,
    UpdateCustomer, UpdateCustomerAccount,
};
use crate::repository::{CustomerAccountRepository, CustomerRepository};

/// Service layer for Customer business logic
#[derive(Clone)]
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new customer
    pub async fn create_customer(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, id: i64) -> CustomerResult<Customer> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// List all customers
    pub async fn list_customers(&self) -> CustomerResult<Vec<Customer>> {
        self.repository.list().await
    }

    /// Replace a customer's details
    pub async fn update_customer(&self, id: i64, input: UpdateCustomer) -> CustomerResult<Customer> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a customer; a conflict while orders or an account still
    /// reference it
    pub async fn delete_customer(&self, id: i64) -> CustomerResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(CustomerError::NotFound(id));
        }

        Ok(())
    }
}

/// Service layer for CustomerAccount business logic; hashes passwords
/// before they reach the repository
#[derive(Clone)]
pub struct CustomerAccountService<R: CustomerAccountRepository> {
    repository: Arc<R>,
}

impl<R: CustomerAccountRepository> CustomerAccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn hash_password(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::PasswordHash(e.to_string()))
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> AccountResult<Vec<CustomerAccount>> {
        self.repository.list().await
    }

    /// Get the account owned by a customer
    pub async fn get_account(&self, customer_id: i64) -> AccountResult<CustomerAccount> {
        self.repository
            .get_by_customer(customer_id)
            .await?
            .ok_or(AccountError::NotFound(customer_id))
    }

    /// Create an account with a hashed password
    pub async fn create_account(
        &self,
        input: CreateCustomerAccount,
    ) -> AccountResult<CustomerAccount> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let password_hash = self.hash_password(&input.password)?;

        self.repository
            .create(NewAccount {
                username: input.username,
                password_hash,
                customer_id: input.customer_id,
            })
            .await
    }

    /// Replace the credentials of a customer's account
    pub async fn update_account(
        &self,
        customer_id: i64,
        input: UpdateCustomerAccount,
    ) -> AccountResult<CustomerAccount> {
        input
            .validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        let password_hash = self.hash_password(&input.password)?;

        self.repository
            .update_by_customer(
                customer_id,
                AccountChanges {
                    username: input.username,
                    password_hash,
                },
            )
            .await
    }

    /// Delete the account owned by a customer
    pub async fn delete_account(&self, customer_id: i64) -> AccountResult<()> {
        let deleted = self.repository.delete_by_customer(customer_id).await?;

        if !deleted {
            return Err(AccountError::NotFound(customer_id));
        }

        Ok(())
    }
}
