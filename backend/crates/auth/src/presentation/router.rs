//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::handlers::{self, AuthAppState};
use store::UserRepository;

/// Account routes, to be nested under `/api`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/user", get(handlers::list_users::<R>))
        .with_state(state)
}
