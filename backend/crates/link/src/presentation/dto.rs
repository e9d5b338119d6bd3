//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Link;

/// POST /api/links
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub slug: String,
    pub original_url: String,
}

/// PUT /api/links
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLinkRequest {
    pub slug: String,
    pub original_url: String,
    /// New expiry; must be in the future. Unchanged when absent.
    #[serde(default)]
    pub expired_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub slug: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expired_date: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            slug: link.slug,
            original_url: link.original_url,
            created_at: link.created_at,
            expired_date: link.expired_date,
        }
    }
}

/// Short confirmation body for mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
