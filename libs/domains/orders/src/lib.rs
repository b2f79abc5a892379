//! Orders Domain
//!
//! Order placement and tracking. An order belongs to one customer and
//! references any number of products through a join table; creation
//! verifies that the customer and every referenced product exist.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_orders::{
//!     handlers,
//!     repository::InMemoryOrderRepository,
//!     service::OrderService,
//! };
//!
//! let repository = InMemoryOrderRepository::new();
//! let service = OrderService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use models::{CreateOrder, Order};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
