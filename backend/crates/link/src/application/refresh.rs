//! Refresh Link Use Case
//!
//! Restarts a link's lifetime from now. Works on expired links too.

use std::sync::Arc;

use chrono::Utc;
use store::{Link, LinkRepository};

use crate::application::config::LinkConfig;
use crate::error::{LinkError, LinkResult};

pub struct RefreshLinkUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
    config: Arc<LinkConfig>,
}

impl<R> RefreshLinkUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LinkConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, owner_email: &str, slug: &str) -> LinkResult<Link> {
        let mut link = self
            .repo
            .get_link_by_slug(slug)
            .await?
            .ok_or(LinkError::NotFound)?;

        link.refresh_with_ttl(Utc::now(), self.config.ttl);

        self.repo.update_link_by_slug(owner_email, &link).await?;

        tracing::info!(
            slug = %slug,
            owner = %owner_email,
            expired_date = %link.expired_date,
            "Link refreshed"
        );

        Ok(link)
    }
}
