//! In-Memory Repository Implementation
//!
//! Same contract as `PgStore`, kept in a `Vec` behind an async `RwLock`.
//! Used by the test suite and by `STORE=memory` for local development.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::model::{Link, User};
use crate::repository::{LinkRepository, UserRepository};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(users: &[User], slug: &str) -> bool {
    users.iter().any(|user| user.find_link(slug).is_some())
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if user.links.iter().any(|link| slug_taken(&users, &link.slug)) {
            return Err(StoreError::DuplicateSlug);
        }

        users.push(user.clone());
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.email == user.email)
            .ok_or(StoreError::UserNotFound)?;

        stored.username = user.username.clone();
        stored.password = user.password.clone();
        Ok(())
    }

    async fn delete_user_by_email(&self, email: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.email != email);

        if users.len() == before {
            return Err(StoreError::UserNotFound);
        }
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

impl LinkRepository for MemoryStore {
    async fn create_link(&self, owner_email: &str, link: &Link) -> StoreResult<()> {
        let mut users = self.users.write().await;

        if !users.iter().any(|u| u.email == owner_email) {
            return Err(StoreError::UserNotFound);
        }
        if slug_taken(&users, &link.slug) {
            return Err(StoreError::DuplicateSlug);
        }

        if let Some(owner) = users.iter_mut().find(|u| u.email == owner_email) {
            owner.links.push(link.clone());
        }
        Ok(())
    }

    async fn get_link_by_slug(&self, slug: &str) -> StoreResult<Option<Link>> {
        let users = self.users.read().await;
        Ok(users.iter().find_map(|u| u.find_link(slug)).cloned())
    }

    async fn list_links(&self, owner_email: &str) -> StoreResult<Vec<Link>> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email == owner_email)
            .map(|u| u.links.clone())
            .ok_or(StoreError::UserNotFound)
    }

    async fn delete_link_by_slug(&self, owner_email: &str, slug: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let owner = users
            .iter_mut()
            .find(|u| u.email == owner_email)
            .ok_or(StoreError::LinkNotFound)?;

        let before = owner.links.len();
        owner.links.retain(|link| link.slug != slug);

        if owner.links.len() == before {
            return Err(StoreError::LinkNotFound);
        }
        Ok(())
    }

    async fn update_link_by_slug(&self, owner_email: &str, link: &Link) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.email == owner_email)
            .and_then(|u| u.links.iter_mut().find(|l| l.slug == link.slug))
            .ok_or(StoreError::LinkNotFound)?;

        stored.original_url = link.original_url.clone();
        stored.expired_date = link.expired_date;
        Ok(())
    }
}
