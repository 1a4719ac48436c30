//! HTTP client configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    HTTP_CONNECT_TIMEOUT_SECS, HTTP_POOL_IDLE_TIMEOUT_SECS, HTTP_POOL_MAX_IDLE_PER_HOST,
    HTTP_TIMEOUT_SECS, HTTP_USER_AGENT,
};

/// HTTP client configuration
///
/// Controls connection pooling and client-wide timeouts of the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total timeout for one request in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout in seconds
    pub pool_idle_timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: HTTP_TIMEOUT_SECS,
            connect_timeout_secs: HTTP_CONNECT_TIMEOUT_SECS,
            pool_max_idle_per_host: HTTP_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout_secs: HTTP_POOL_IDLE_TIMEOUT_SECS,
            user_agent: HTTP_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Create configuration with custom timeout only
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout_secs: timeout.as_secs(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}
