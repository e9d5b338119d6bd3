//! Bearer Token Service
//!
//! HS256 JSON Web Tokens carrying the account email. The validity window is
//! checked here rather than by `jsonwebtoken`, with zero leeway:
//! `iat <= now`, `now >= nbf`, `now < exp`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime (72 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(72 * 3600);

/// Default issuer, also used as the audience
pub const DEFAULT_ISSUER: &str = "shortener";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

// ============================================================================
// Claims
// ============================================================================

/// Claim set carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    fn check_window(&self, now: i64) -> Result<(), TokenError> {
        if self.iat > now {
            return Err(TokenError::Invalid("issued in the future".into()));
        }
        if now < self.nbf {
            return Err(TokenError::Invalid("not yet valid".into()));
        }
        if now >= self.exp {
            return Err(TokenError::Invalid("expired".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Config
// ============================================================================

#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC secret
    pub secret: Vec<u8>,
    /// `iss` and `aud` value
    pub issuer: String,
    /// Lifetime of an issued token
    pub ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: vec![0u8; 32],
            issuer: DEFAULT_ISSUER.to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl TokenConfig {
    /// Config with a random 32-byte secret (for development and tests)
    pub fn with_random_secret() -> Self {
        let mut secret = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self {
            secret,
            ..Default::default()
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish()
    }
}

// ============================================================================
// Service
// ============================================================================

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Time claims are checked by `Claims::check_window`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            issuer: config.issuer.clone(),
            ttl: config.ttl,
        }
    }

    /// Claims for `email` issued at `now`
    pub fn claims_for(&self, email: &str, now: DateTime<Utc>) -> Claims {
        let iat = now.timestamp();
        Claims {
            email: email.to_string(),
            exp: iat.saturating_add(i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)),
            iat,
            nbf: iat,
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
        }
    }

    /// Sign an arbitrary claim set
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Sign a fresh token for `email`
    pub fn issue_for(&self, email: &str) -> Result<String, TokenError> {
        self.issue(&self.claims_for(email, Utc::now()))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Verify signature, issuer, audience and the validity window at `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        data.claims.check_window(now.timestamp())?;

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new(&TokenConfig::with_random_secret())
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    const T0: i64 = 1_700_000_000;

    #[test]
    fn test_claims_for() {
        let service = service();
        let claims = service.claims_for("a@b.com", at(T0));

        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.iat, T0);
        assert_eq!(claims.nbf, T0);
        assert_eq!(claims.exp, T0 + 72 * 3600);
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.aud, DEFAULT_ISSUER);
    }

    #[test]
    fn test_huge_ttl_saturates_exp() {
        let service = TokenService::new(&TokenConfig {
            ttl: Duration::from_secs(u64::MAX),
            ..TokenConfig::with_random_secret()
        });

        assert_eq!(service.claims_for("a@b.com", at(T0)).exp, i64::MAX);
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let token = service.issue_for("a@b.com").unwrap();
        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn test_validity_window() {
        let service = service();
        let token = service.issue(&service.claims_for("a@b.com", at(T0))).unwrap();
        let ttl = DEFAULT_TOKEN_TTL.as_secs() as i64;

        assert!(service.validate_at(&token, at(T0)).is_ok());
        assert!(service.validate_at(&token, at(T0 + ttl - 1)).is_ok());

        // No leeway on either edge
        assert!(service.validate_at(&token, at(T0 + ttl)).is_err());
        assert!(service.validate_at(&token, at(T0 - 1)).is_err());
    }

    #[test]
    fn test_not_before_in_future() {
        let service = service();
        let mut claims = service.claims_for("a@b.com", at(T0));
        claims.nbf = T0 + 60;
        let token = service.issue(&claims).unwrap();

        assert!(service.validate_at(&token, at(T0 + 30)).is_err());
        assert!(service.validate_at(&token, at(T0 + 60)).is_ok());
    }

    #[test]
    fn test_issued_in_future() {
        let service = service();
        let mut claims = service.claims_for("a@b.com", at(T0));
        claims.iat = T0 + 10;
        let token = service.issue(&claims).unwrap();

        let err = service.validate_at(&token, at(T0 + 5)).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let issuer = service();
        let other = service();
        let token = issuer.issue_for("a@b.com").unwrap();
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_fails() {
        let config = TokenConfig::with_random_secret();
        let service = TokenService::new(&config);
        let foreign = TokenService::new(&TokenConfig {
            issuer: "someone-else".to_string(),
            ..config.clone()
        });

        let token = foreign.issue_for("a@b.com").unwrap();
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let service = service();
        let mut claims = service.claims_for("a@b.com", Utc::now());
        claims.aud = "elsewhere".to_string();
        let token = service.issue(&claims).unwrap();
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let service = service();
        for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            assert!(matches!(
                service.validate(token),
                Err(TokenError::Invalid(_))
            ));
        }
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = TokenConfig {
            secret: b"super-secret-key".to_vec(),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("REDACTED"));
    }
}
