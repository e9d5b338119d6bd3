//! Link Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Slug and URL value objects
//! - `application/` - Resolve, create, list, update, delete, refresh
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Expiry
//! A link whose `expired_date` has been reached is kept but inert: the
//! public redirect and the update path answer `410 Gone`. Only its owner can
//! delete it or refresh it back to life.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LinkConfig;
pub use error::{LinkError, LinkResult};
pub use presentation::handlers::LinkAppState;
pub use presentation::router::{links_router, redirect_router};
