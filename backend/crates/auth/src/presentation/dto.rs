//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::UserSummary;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Entry of `GET /api/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub link_count: usize,
}

impl From<UserSummary> for UserResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            username: summary.username,
            email: summary.email,
            created_at: summary.created_at,
            link_count: summary.link_count,
        }
    }
}

// ============================================================================
// Common
// ============================================================================

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
