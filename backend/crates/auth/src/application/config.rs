//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::cookie::CookieConfig;
use platform::token::TokenConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Name of the cookie carrying the bearer token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret, issuer and lifetime
    pub token: TokenConfig,
    /// Token cookie name
    pub cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            cookie_name: TOKEN_COOKIE_NAME.to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token: TokenConfig::with_random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie settings for the login response; Max-Age follows the token TTL
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token.ttl_secs()),
        }
    }
}
