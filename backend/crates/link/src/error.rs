//! Link Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use store::StoreError;
use thiserror::Error;

pub type LinkResult<T> = Result<T, LinkError>;

#[derive(Debug, Error)]
pub enum LinkError {
    /// Bad slug, URL or expiry in the payload
    #[error("{0}")]
    Validation(String),

    #[error("Link not found")]
    NotFound,

    /// Past its `expired_date`; kept in storage but inert
    #[error("Link is expired")]
    Expired,

    #[error("Slug is already in use")]
    SlugTaken,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LinkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::LinkNotFound => LinkError::NotFound,
            StoreError::DuplicateSlug => LinkError::SlugTaken,
            other => LinkError::Store(other),
        }
    }
}

impl LinkError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            // Duplicate slug stays 400 for client compatibility
            LinkError::Validation(_) | LinkError::SlugTaken => ErrorKind::BadRequest,
            LinkError::NotFound => ErrorKind::NotFound,
            LinkError::Expired => ErrorKind::Gone,
            LinkError::Store(e) => e.kind(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            LinkError::Store(e) => e.to_app_error(),
            LinkError::SlugTaken => AppError::bad_request(self.to_string())
                .with_action("Choose a different slug"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            LinkError::Store(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Link error");
            }
        }
    }
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
