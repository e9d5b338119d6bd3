//! Domain Layer
//!
//! Validated inputs for link management. The `Link` document itself is
//! defined by the `store` crate.

pub mod original_url;
pub mod slug;

pub use original_url::OriginalUrl;
pub use slug::Slug;
