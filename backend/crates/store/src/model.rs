//! Stored Documents
//!
//! A `User` document owns its `Link`s; a link has no lifecycle of its own.

use chrono::{DateTime, TimeDelta, Utc};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use serde::{Deserialize, Serialize};

/// Days a link stays resolvable after creation or refresh
pub const LINK_TTL_DAYS: i64 = 30;

pub fn link_ttl() -> TimeDelta {
    TimeDelta::days(LINK_TTL_DAYS)
}

// ============================================================================
// Link
// ============================================================================

/// Short link. Serialized as-is into the owner's `links` JSONB array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub slug: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expired_date: DateTime<Utc>,
}

impl Link {
    pub fn new(slug: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self::new_at(slug, original_url, Utc::now())
    }

    pub fn new_at(
        slug: impl Into<String>,
        original_url: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::with_ttl(slug, original_url, now, link_ttl())
    }

    pub fn with_ttl(
        slug: impl Into<String>,
        original_url: impl Into<String>,
        now: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Self {
        Self {
            slug: slug.into(),
            original_url: original_url.into(),
            created_at: now,
            expired_date: now + ttl,
        }
    }

    /// A link is inert from the instant `expired_date` is reached.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_date <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Push expiry to `now + LINK_TTL_DAYS`
    pub fn refresh_at(&mut self, now: DateTime<Utc>) {
        self.refresh_with_ttl(now, link_ttl());
    }

    pub fn refresh_with_ttl(&mut self, now: DateTime<Utc>, ttl: TimeDelta) {
        self.expired_date = now + ttl;
    }
}

// ============================================================================
// User
// ============================================================================

/// Account document, keyed by email
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub links: Vec<Link>,
}

impl User {
    /// New account with no links. Hashes `password` (blocking).
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &ClearTextPassword,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            username: username.into(),
            email: email.into(),
            password: password.hash()?,
            created_at: Utc::now(),
            links: Vec::new(),
        })
    }

    /// Replace the stored hash. Blocking.
    pub fn set_password(&mut self, password: &ClearTextPassword) -> Result<(), PasswordHashError> {
        self.password = password.hash()?;
        Ok(())
    }

    pub fn verify_password(&self, candidate: &ClearTextPassword) -> bool {
        self.password.verify(candidate)
    }

    pub fn find_link(&self, slug: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.slug == slug)
    }
}
