//! Repository Traits
//!
//! Natural keys only: users by email, links by slug. Links live inside their
//! owner's document, so every link write names the owner.

use crate::error::StoreResult;
use crate::model::{Link, User};

/// User document repository
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. `DuplicateEmail` if the email is taken.
    async fn create_user(&self, user: &User) -> StoreResult<()>;

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Overwrite username and password hash. Links are left alone.
    async fn update_user(&self, user: &User) -> StoreResult<()>;

    /// Remove a user and every link they own
    async fn delete_user_by_email(&self, email: &str) -> StoreResult<()>;

    /// All users, oldest first
    async fn list_users(&self) -> StoreResult<Vec<User>>;
}

/// Link repository
#[trait_variant::make(LinkRepository: Send)]
pub trait LocalLinkRepository {
    /// Append a link to the owner's document. `DuplicateSlug` if the slug is
    /// used by anyone.
    async fn create_link(&self, owner_email: &str, link: &Link) -> StoreResult<()>;

    /// Global lookup across all users
    async fn get_link_by_slug(&self, slug: &str) -> StoreResult<Option<Link>>;

    /// The owner's links in insertion order
    async fn list_links(&self, owner_email: &str) -> StoreResult<Vec<Link>>;

    /// `LinkNotFound` unless `(owner_email, slug)` matches
    async fn delete_link_by_slug(&self, owner_email: &str, slug: &str) -> StoreResult<()>;

    /// Overwrite `original_url` and `expired_date` of the owner's link with
    /// `link.slug`. `LinkNotFound` unless `(owner_email, slug)` matches.
    async fn update_link_by_slug(&self, owner_email: &str, link: &Link) -> StoreResult<()>;
}
