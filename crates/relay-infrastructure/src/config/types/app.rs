//! Main application configuration

use std::collections::BTreeMap;

use relay_application::config::ConfigMap;
use serde::{Deserialize, Serialize};

use super::http::HttpConfig;
use super::logging::LoggingConfig;

/// Root configuration of a relay process
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [http]
/// timeout_secs = 120
///
/// [defaults]
/// model = ["openai/gpt-4o", "openai/gpt-4o-mini"]
/// timeout = 30000
///
/// [capabilities.embedding]
/// model = "openai/text-embedding-3-small"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// HTTP transport setup
    pub http: HttpConfig,
    /// Global engine configuration layer
    pub defaults: ConfigMap,
    /// Per-capability engine configuration layers, keyed by capability name
    pub capabilities: BTreeMap<String, ConfigMap>,
}
