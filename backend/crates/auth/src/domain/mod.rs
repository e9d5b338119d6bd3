//! Domain Layer
//!
//! Account value objects and the request-scoped identity. The documents and
//! repository traits themselves live in the `store` crate.

pub mod current_user;
pub mod value_object;

// Re-exports
pub use current_user::CurrentUser;
pub use value_object::{email::Email, user_name::UserName};
