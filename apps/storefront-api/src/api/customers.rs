use axum::Router;
use domain_customers::{CustomerService, PgCustomerRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCustomerRepository::new(state.db.clone());
    let service = CustomerService::new(repository);
    handlers::customer_router(service)
}
