//! Application state management.
//!
//! The state contains the loaded configuration and the PostgreSQL
//! connection pool; handlers receive cheap clones of it.

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
