//! List Users Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use store::UserRepository;

use crate::error::AuthResult;

/// Public view of an account; no password hash, no link contents
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub link_count: usize,
}

pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AuthResult<Vec<UserSummary>> {
        let users = self.repo.list_users().await?;

        Ok(users
            .into_iter()
            .map(|user| UserSummary {
                link_count: user.links.len(),
                username: user.username,
                email: user.email,
                created_at: user.created_at,
            })
            .collect())
    }
}
