use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(i64),

    #[error("Customer {0} is still referenced by orders or an account")]
    Referenced(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CustomerResult<T> = Result<T, CustomerError>;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Customer {0} has no account")]
    NotFound(i64),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Customer {0} already has an account")]
    AlreadyExists(i64),

    #[error("Customer not found: {0}")]
    CustomerMissing(i64),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Convert CustomerError to AppError for standardized error responses
impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(id) => {
                AppError::NotFound(format!("Customer {} not found", id))
            }
            CustomerError::Referenced(id) => AppError::Conflict(format!(
                "Customer {} is still referenced by orders or an account",
                id
            )),
            CustomerError::Validation(msg) => AppError::BadRequest(msg),
            CustomerError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(customer_id) => {
                AppError::NotFound(format!("Customer {} has no account", customer_id))
            }
            AccountError::DuplicateUsername(username) => {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            }
            AccountError::AlreadyExists(customer_id) => {
                AppError::Conflict(format!("Customer {} already has an account", customer_id))
            }
            // A missing customer is an input problem, not a lookup miss
            AccountError::CustomerMissing(customer_id) => {
                AppError::BadRequest(format!("Customer {} does not exist", customer_id))
            }
            AccountError::PasswordHash(msg) => AppError::InternalServerError(msg),
            AccountError::Validation(msg) => AppError::BadRequest(msg),
            AccountError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
