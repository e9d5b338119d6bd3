//! Create Link Use Case

use std::sync::Arc;

use chrono::Utc;
use store::{Link, LinkRepository};

use crate::application::config::LinkConfig;
use crate::domain::{OriginalUrl, Slug};
use crate::error::LinkResult;

/// Create link input
pub struct CreateLinkInput {
    pub slug: String,
    pub original_url: String,
}

pub struct CreateLinkUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
    config: Arc<LinkConfig>,
}

impl<R> CreateLinkUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LinkConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, owner_email: &str, input: CreateLinkInput) -> LinkResult<Link> {
        let slug = Slug::new(input.slug)?;
        let original_url = OriginalUrl::new(&input.original_url)?;

        let link = Link::with_ttl(
            slug.into_inner(),
            original_url.into_inner(),
            Utc::now(),
            self.config.ttl,
        );

        // Slug uniqueness is enforced by the store, atomically
        self.repo.create_link(owner_email, &link).await?;

        tracing::info!(
            slug = %link.slug,
            owner = %owner_email,
            expired_date = %link.expired_date,
            "Link created"
        );

        Ok(link)
    }
}
