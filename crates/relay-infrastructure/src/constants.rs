//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Engine constants are defined in `relay_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "relay.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "relay";

/// Environment variable prefix for configuration (`RELAY__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "RELAY";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "RELAY_LOG";

/// Default file name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "relay";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;

// ============================================================================
// HTTP CLIENT CONSTANTS
// ============================================================================

/// Overall request timeout in seconds
///
/// A backstop only; per-call timeouts come from the engine configuration.
pub const HTTP_TIMEOUT_SECS: u64 = 600;

/// Connection timeout in seconds
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum idle connections kept per host
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Idle connection timeout in seconds
pub const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// User agent sent with every request
pub const HTTP_USER_AGENT: &str = concat!("relay/", env!("CARGO_PKG_VERSION"));
