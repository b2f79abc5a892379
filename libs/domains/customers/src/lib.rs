//! Customers Domain
//!
//! Customer records and their store accounts. This crate owns two
//! aggregates: `Customer` (contact details) and `CustomerAccount`
//! (login credentials, at most one per customer, keyed by customer id
//! on the API surface). Passwords are hashed with argon2 in the
//! service layer; the hash never leaves the repository boundary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_customers::{
//!     handlers,
//!     repository::InMemoryCustomerRepository,
//!     service::{CustomerAccountService, CustomerService},
//! };
//!
//! let repository = InMemoryCustomerRepository::new();
//! let customers = CustomerService::new(repository.clone());
//! let accounts = CustomerAccountService::new(repository);
//!
//! let customer_routes = handlers::customer_router(customers);
//! let account_routes = handlers::account_router(accounts);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{AccountError, AccountResult, CustomerError, CustomerResult};
pub use models::{
    AccountChanges, CreateCustomer, CreateCustomerAccount, Customer, CustomerAccount, NewAccount,
    UpdateCustomer, UpdateCustomerAccount,
};
pub use postgres::PgCustomerRepository;
pub use repository::{CustomerAccountRepository, CustomerRepository, InMemoryCustomerRepository};
pub use service::{CustomerAccountService, CustomerService};
