//! Platform Crate - Technical Infrastructure
//!
//! Shared technical building blocks with no knowledge of users or links:
//! - Password hashing (Argon2id)
//! - Bearer tokens (HS256 JWT)
//! - Cookie and `Authorization` header helpers

pub mod cookie;
pub mod password;
pub mod token;
