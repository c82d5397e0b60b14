//! Users API routes

use axum::Router;
use domain_users::{InMemoryUserRepository, UserService, handlers};

/// Create users router backed by a freshly seeded store
pub fn router() -> Router {
    let repository = InMemoryUserRepository::seeded();
    let service = UserService::new(repository);
    handlers::router(service)
}
