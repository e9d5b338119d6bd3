//! Delete Link Use Case

use std::sync::Arc;

use store::LinkRepository;

use crate::error::{LinkError, LinkResult};

pub struct DeleteLinkUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteLinkUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Expired links can still be deleted by their owner.
    pub async fn execute(&self, owner_email: &str, slug: &str) -> LinkResult<()> {
        if self.repo.get_link_by_slug(slug).await?.is_none() {
            return Err(LinkError::NotFound);
        }

        self.repo.delete_link_by_slug(owner_email, slug).await?;

        tracing::info!(slug = %slug, owner = %owner_email, "Link deleted");

        Ok(())
    }
}
