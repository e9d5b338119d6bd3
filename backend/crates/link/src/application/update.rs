//! Update Link Use Case
//!
//! Changes the redirect target and, optionally, the expiry of a live link.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use store::{Link, LinkRepository};

use crate::domain::{OriginalUrl, Slug};
use crate::error::{LinkError, LinkResult};

/// Update link input
pub struct UpdateLinkInput {
    pub slug: String,
    pub original_url: String,
    pub expired_date: Option<DateTime<Utc>>,
}

pub struct UpdateLinkUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateLinkUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_email: &str, input: UpdateLinkInput) -> LinkResult<Link> {
        let now = Utc::now();

        let slug = Slug::new(input.slug)?;
        let original_url = OriginalUrl::new(&input.original_url)?;

        if matches!(input.expired_date, Some(expired_date) if expired_date <= now) {
            return Err(LinkError::Validation(
                "expired_date must be in the future".into(),
            ));
        }

        let mut link = self
            .repo
            .get_link_by_slug(slug.as_str())
            .await?
            .ok_or(LinkError::NotFound)?;

        if link.is_expired_at(now) {
            return Err(LinkError::Expired);
        }

        link.original_url = original_url.into_inner();
        if let Some(expired_date) = input.expired_date {
            link.expired_date = expired_date;
        }

        // Scoped to the owner; someone else's slug reads as not found
        self.repo.update_link_by_slug(owner_email, &link).await?;

        tracing::info!(slug = %link.slug, owner = %owner_email, "Link updated");

        Ok(link)
    }
}
