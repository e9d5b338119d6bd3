//! Store Error Types

use std::time::Duration;

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Slug is already in use")]
    DuplicateSlug,

    #[error("User not found")]
    UserNotFound,

    #[error("Link not found")]
    LinkNotFound,

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be decoded
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Conflicts stay 400 for client compatibility
            StoreError::DuplicateEmail | StoreError::DuplicateSlug => ErrorKind::BadRequest,
            StoreError::UserNotFound | StoreError::LinkNotFound => ErrorKind::NotFound,
            StoreError::Timeout(_) | StoreError::Database(_) | StoreError::Corrupt(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        self.kind().is_server_error()
    }

    pub fn to_app_error(&self) -> AppError {
        if self.is_infrastructure() {
            AppError::internal("Internal server error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    pub fn log(&self) {
        match self {
            StoreError::Timeout(after) => {
                tracing::error!(timeout = ?after, "Store query timed out");
            }
            StoreError::Database(e) => {
                tracing::error!(error = %e, "Store database error");
            }
            StoreError::Corrupt(detail) => {
                tracing::error!(detail = %detail, "Corrupt stored document");
            }
            _ => {
                tracing::debug!(error = %self, "Store error");
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        err.to_app_error().with_source(err)
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
