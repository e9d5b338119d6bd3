//! Store (Persistence Gateway) Module
//!
//! User documents keyed by email, each embedding its links in insertion
//! order. Two implementations of the same repository traits:
//! - `PgStore` - PostgreSQL, links as a JSONB array plus a `link_slugs` index
//! - `MemoryStore` - process-local, for tests and development
//!
//! ## Guarantees
//! - Email uniqueness is checked atomically at insert
//! - Slug uniqueness is global and checked atomically at insert
//! - Every PostgreSQL call is bounded by `StoreConfig::query_timeout`

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod repository;

// Re-exports for convenience
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{LINK_TTL_DAYS, Link, User, link_ttl};
pub use postgres::{PgStore, StoreConfig};
pub use repository::{LinkRepository, UserRepository};

#[cfg(test)]
mod tests;
