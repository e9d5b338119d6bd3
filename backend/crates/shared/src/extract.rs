//! Request extractors
//!
//! [`JsonBody`] behaves like `axum::Json` but rejects with [`AppError`], so a
//! malformed payload always answers 400 in the problem-details format.

use axum::extract::FromRequest;

use crate::error::app_error::AppError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
