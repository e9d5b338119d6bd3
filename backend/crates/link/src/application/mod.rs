//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod refresh;
pub mod resolve;
pub mod update;

// Re-exports
pub use config::LinkConfig;
pub use create::{CreateLinkInput, CreateLinkUseCase};
pub use delete::DeleteLinkUseCase;
pub use list::ListLinksUseCase;
pub use refresh::RefreshLinkUseCase;
pub use resolve::ResolveLinkUseCase;
pub use update::{UpdateLinkInput, UpdateLinkUseCase};
