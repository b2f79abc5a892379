use axum::Router;
use domain_customers::{CustomerAccountService, PgCustomerRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    // PgCustomerRepository also implements CustomerAccountRepository,
    // so both routers share one repository type over the same pool.
    let repository = PgCustomerRepository::new(state.db.clone());
    let service = CustomerAccountService::new(repository);
    handlers::account_router(service)
}
