//! Current User
//!
//! Identity resolved by the auth middleware, stored in the request's
//! extensions for the lifetime of that request only.

use store::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
