//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects and the request-scoped `CurrentUser`
//! - `application/` - Use cases and application services
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! Persistence is provided by the `store` crate.
//!
//! ## Features
//! - Registration with username, email and password
//! - Login issuing an HS256 bearer token (JSON body and `token` cookie)
//! - `require_auth` middleware for protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens checked for signature, issuer, audience and time window, no leeway
//! - Every authentication failure answers the same `401 Unauthorized`

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::CurrentUser;
pub use error::{AuthError, AuthResult};
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AuthMiddlewareState, require_auth};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
