//! Link Routers
//!
//! Both routers carry absolute paths and are merged at the application root.

use auth::{AuthMiddlewareState, require_auth};
use axum::{Router, middleware, routing::get};
use store::{LinkRepository, UserRepository};

use crate::presentation::handlers::{self, LinkAppState};

/// Public `GET /{slug}` redirect
pub fn redirect_router<R>(state: LinkAppState<R>) -> Router
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/{slug}", get(handlers::redirect::<R>))
        .with_state(state)
}

/// Owner-scoped link management under `/api/links`, behind `require_auth`
pub fn links_router<R>(state: LinkAppState<R>, auth: AuthMiddlewareState<R>) -> Router
where
    R: LinkRepository + UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/links",
            get(handlers::list_links::<R>)
                .post(handlers::create_link::<R>)
                .put(handlers::update_link::<R>),
        )
        .route(
            "/api/links/{slug}",
            axum::routing::delete(handlers::delete_link::<R>),
        )
        .route(
            "/api/links/refresh/{slug}",
            get(handlers::refresh_link::<R>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_auth::<R>))
        .with_state(state)
}
