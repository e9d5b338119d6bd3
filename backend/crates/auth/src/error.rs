//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use store::StoreError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed registration or login input
    #[error("{0}")]
    Validation(String),

    /// Password policy violation
    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Request could not be authenticated; the reason is logged, never sent
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) | AuthError::EmailTaken => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials | AuthError::Unauthorized(_) => ErrorKind::Unauthorized,
            AuthError::Token(TokenError::Invalid(_)) => ErrorKind::Unauthorized,
            AuthError::Token(TokenError::Signing(_))
            | AuthError::PasswordHash(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Store(e) => e.kind(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            ErrorKind::Unauthorized if !matches!(self, AuthError::InvalidCredentials) => {
                AppError::unauthorized("Unauthorized")
            }
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Store(e) => e.log(),
            AuthError::Token(TokenError::Signing(e)) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {}", err))
    }
}
