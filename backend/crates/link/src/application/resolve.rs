//! Resolve Link Use Case
//!
//! Public slug lookup behind the redirect. No authentication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use store::LinkRepository;

use crate::error::{LinkError, LinkResult};

pub struct ResolveLinkUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
}

impl<R> ResolveLinkUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Redirect target for `slug`
    pub async fn execute(&self, slug: &str) -> LinkResult<String> {
        self.execute_at(slug, Utc::now()).await
    }

    pub async fn execute_at(&self, slug: &str, now: DateTime<Utc>) -> LinkResult<String> {
        let link = self
            .repo
            .get_link_by_slug(slug)
            .await?
            .ok_or(LinkError::NotFound)?;

        if link.is_expired_at(now) {
            tracing::debug!(slug = %slug, expired_date = %link.expired_date, "Expired link requested");
            return Err(LinkError::Expired);
        }

        Ok(link.original_url)
    }
}
