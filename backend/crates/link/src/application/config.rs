//! Application Configuration

use chrono::TimeDelta;

/// Link application configuration
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Lifetime given to a link on creation and on refresh
    pub ttl: TimeDelta,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ttl: store::link_ttl(),
        }
    }
}

impl LinkConfig {
    pub fn development() -> Self {
        Self::default()
    }
}
