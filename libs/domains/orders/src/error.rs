use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Customer not found: {0}")]
    CustomerMissing(i64),

    #[error("Product not found: {0}")]
    ProductMissing(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Convert OrderError to AppError for standardized error responses
impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            // Referencing a missing customer or product is an input
            // problem on the create path, not a lookup miss
            OrderError::CustomerMissing(id) => {
                AppError::BadRequest(format!("Customer {} does not exist", id))
            }
            OrderError::ProductMissing(id) => {
                AppError::BadRequest(format!("Product {} does not exist", id))
            }
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
