//! User Name Value Object
//!
//! Display name only; accounts are keyed by email, so names need not be
//! unique. NFKC normalized and trimmed.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 1;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();
        let len = name.chars().count();

        if len < USER_NAME_MIN_LENGTH {
            return Err(AuthError::Validation("Username cannot be empty".into()));
        }

        if len > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Username contains invalid characters".into(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
