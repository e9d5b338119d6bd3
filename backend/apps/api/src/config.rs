//! Server Configuration
//!
//! Everything is read from the process environment (a `.env` file is loaded
//! first by `main`). Library crates receive typed config structs built here.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use link::LinkConfig;
use platform::token::{DEFAULT_ISSUER, TokenConfig};
use store::StoreConfig;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Which persistence backend serves the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Volatile, for local development only
    Memory,
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Duration,
    /// Per-query deadline, also used as the pool acquire timeout
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            query_timeout: self.query_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    pub store: StoreBackend,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub link: LinkConfig,
    pub frontend_origins: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr: SocketAddr =
            parse_or(&var, "LISTEN_ADDR", DEFAULT_LISTEN_ADDR.parse()?)?;

        let store = match var("STORE").as_deref().map(str::trim) {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE must be `postgres` or `memory`, got `{other}`"),
        };

        let database = DatabaseConfig {
            url: var("DATABASE_URL"),
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 30)?,
            min_connections: parse_or(&var, "DB_MIN_CONNECTIONS", 0)?,
            idle_timeout: Duration::from_secs(parse_or(&var, "DB_IDLE_TIMEOUT_SECS", 900)?),
            query_timeout: Duration::from_secs(parse_or(&var, "DB_QUERY_TIMEOUT_SECS", 5)?),
        };

        if store == StoreBackend::Postgres && database.url.is_none() {
            bail!("DATABASE_URL must be set (or STORE=memory for development)");
        }
        if database.min_connections > database.max_connections {
            bail!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                database.min_connections,
                database.max_connections
            );
        }
        if database.query_timeout.is_zero() {
            bail!("DB_QUERY_TIMEOUT_SECS must be at least 1");
        }

        let auth = auth_config(&var)?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            listen_addr,
            store,
            database,
            auth,
            link: LinkConfig::default(),
            frontend_origins,
        })
    }
}

fn auth_config<F>(var: &F) -> anyhow::Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let hours: u64 = parse_or(var, "AUTH_EXP_HOURS", 72)?;
    if hours == 0 {
        bail!("AUTH_EXP_HOURS must be at least 1");
    }
    // Token timestamps are i64 seconds
    let ttl_secs = hours
        .checked_mul(3600)
        .filter(|secs| i64::try_from(*secs).is_ok())
        .with_context(|| format!("AUTH_EXP_HOURS is too large: {hours}"))?;

    let secret = match var("AUTH_SECRET") {
        Some(secret) => secret.into_bytes(),
        None if cfg!(debug_assertions) => {
            tracing::warn!("AUTH_SECRET not set, using a random secret; tokens will not survive a restart");
            TokenConfig::with_random_secret().secret
        }
        None => bail!("AUTH_SECRET must be set in release builds"),
    };

    let token = TokenConfig {
        secret,
        issuer: var("AUTH_ISS").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        ttl: Duration::from_secs(ttl_secs),
    };

    Ok(AuthConfig {
        token,
        cookie_secure: parse_or(var, "COOKIE_SECURE", !cfg!(debug_assertions))?,
        ..AuthConfig::default()
    })
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: `{raw}`")),
        None => Ok(default),
    }
}
