//! Register Use Case
//!
//! Creates a new account keyed by email.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use store::{StoreError, User, UserRepository};

use crate::domain::{Email, UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub username: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let username = UserName::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let password = ClearTextPassword::new(input.password)?;

        // Fast path; the insert below is the authoritative uniqueness check
        if self.repo.get_user_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = tokio::task::spawn_blocking(move || {
            User::new(username.into_inner(), email.into_inner(), &password)
        })
        .await??;

        self.repo.create_user(&user).await.map_err(|e| match e {
            StoreError::DuplicateEmail => AuthError::EmailTaken,
            other => AuthError::Store(other),
        })?;

        tracing::info!(email = %user.email, username = %user.username, "User registered");

        Ok(RegisterOutput {
            username: user.username,
            email: user.email,
        })
    }
}
