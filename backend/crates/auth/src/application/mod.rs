//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod list_users;
pub mod login;
pub mod register;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use list_users::{ListUsersUseCase, UserSummary};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
