//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every other crate agrees on:
//! - The unified [`error::app_error::AppError`] and its result alias
//! - The [`error::kind::ErrorKind`] classification mapped to HTTP statuses
//! - A JSON body extractor whose rejections are rendered as `AppError`
//!
//! Only things with the same meaning across the auth and link domains
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

#[cfg(feature = "axum")]
pub mod extract;
