//! List Links Use Case

use std::sync::Arc;

use store::{Link, LinkRepository};

use crate::error::LinkResult;

pub struct ListLinksUseCase<R>
where
    R: LinkRepository,
{
    repo: Arc<R>,
}

impl<R> ListLinksUseCase<R>
where
    R: LinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The owner's links, expired ones included, in insertion order
    pub async fn execute(&self, owner_email: &str) -> LinkResult<Vec<Link>> {
        Ok(self.repo.list_links(owner_email).await?)
    }
}
