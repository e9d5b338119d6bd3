//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::{extract_bearer_token, extract_cookie};
use platform::token::TokenService;
use store::UserRepository;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::domain::CurrentUser;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> From<&AuthAppState<R>> for AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from(state: &AuthAppState<R>) -> Self {
        Self {
            repo: state.repo.clone(),
            config: state.config.clone(),
            tokens: state.tokens.clone(),
        }
    }
}

/// Middleware that requires a valid bearer token.
///
/// Looks at `Authorization: Bearer` first, then the token cookie. On success
/// the resolved `CurrentUser` is inserted into the request extensions.
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let token = extract_bearer_token(headers)
        .or_else(|| extract_cookie(headers, &state.config.cookie_name));

    let Some(token) = token else {
        return Err(AuthError::Unauthorized("no credentials").into_response());
    };

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());

    let current_user = use_case
        .execute(&token)
        .await
        .map_err(IntoResponse::into_response)?;

    tracing::debug!(email = %current_user.email, "Request authenticated");

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

/// Handlers behind `require_auth` take `CurrentUser` as an extractor.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized("route is not behind require_auth"))
    }
}
