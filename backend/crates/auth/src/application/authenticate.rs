//! Authenticate Use Case
//!
//! Bearer token to `CurrentUser`. Every failure is `Unauthorized`; the
//! variant reason only reaches the logs.

use std::sync::Arc;

use platform::token::TokenService;
use store::UserRepository;

use crate::domain::CurrentUser;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<CurrentUser> {
        let claims = self.tokens.validate(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::Unauthorized("invalid token")
        })?;

        if claims.email.trim().is_empty() {
            return Err(AuthError::Unauthorized("missing email claim"));
        }

        match self.repo.get_user_by_email(&claims.email).await {
            Ok(Some(user)) => Ok(CurrentUser::from(&user)),
            Ok(None) => Err(AuthError::Unauthorized("unknown user")),
            Err(e) => {
                e.log();
                Err(AuthError::Unauthorized("user lookup failed"))
            }
        }
    }
}
