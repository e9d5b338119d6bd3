//! Slug Value Object
//!
//! Path segment a short link is served under: 1 to 64 characters of
//! `[A-Za-z0-9_-]`. Case-sensitive.

use std::fmt;

use crate::error::{LinkError, LinkResult};

pub const SLUG_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(raw: impl Into<String>) -> LinkResult<Self> {
        let slug = raw.into();

        if slug.is_empty() {
            return Err(LinkError::Validation("Slug cannot be empty".into()));
        }

        if slug.len() > SLUG_MAX_LENGTH {
            return Err(LinkError::Validation(format!(
                "Slug must be at most {} characters",
                SLUG_MAX_LENGTH
            )));
        }

        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(LinkError::Validation(
                "Slug may only contain letters, digits, '-' and '_'".into(),
            ));
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
