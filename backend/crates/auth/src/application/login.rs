//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::Arc;

use platform::password::{ClearTextPassword, MIN_PASSWORD_LENGTH};
use platform::token::TokenService;
use store::UserRepository;

use crate::domain::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub email: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let password = ClearTextPassword::new_unchecked(input.password);
        if password.char_count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let email = Email::normalize(&input.email);

        let user = match self.repo.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email = %email, "Login for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let (user, verified) = tokio::task::spawn_blocking(move || {
            let verified = user.verify_password(&password);
            (user, verified)
        })
        .await?;

        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue_for(&user.email)?;

        tracing::info!(email = %user.email, "User logged in");

        Ok(LoginOutput {
            token,
            email: user.email,
        })
    }
}
