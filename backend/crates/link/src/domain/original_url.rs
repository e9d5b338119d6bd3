//! Original URL Value Object
//!
//! Redirect target. Must parse as an absolute `http` or `https` URL with a
//! host; stored exactly as the client sent it (trimmed), so it must not
//! contain control characters and is always a valid `Location` value.

use url::Url;

use crate::error::{LinkError, LinkResult};

pub const ORIGINAL_URL_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalUrl(String);

impl OriginalUrl {
    pub fn new(raw: impl AsRef<str>) -> LinkResult<Self> {
        let raw = raw.as_ref().trim();

        if raw.len() > ORIGINAL_URL_MAX_LENGTH {
            return Err(LinkError::Validation(format!(
                "URL must be at most {} characters",
                ORIGINAL_URL_MAX_LENGTH
            )));
        }

        if raw.chars().any(char::is_control) {
            return Err(LinkError::Validation(
                "URL must not contain control characters".into(),
            ));
        }

        let parsed = Url::parse(raw)
            .map_err(|e| LinkError::Validation(format!("Invalid URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LinkError::Validation(
                "URL scheme must be http or https".into(),
            ));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(LinkError::Validation("URL must have a host".into()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
