//! Domain layer constants
//!
//! Constants that define identifier parsing, retry classification, stream
//! decoding and configuration keys. Infrastructure-specific constants remain
//! in `relay-infrastructure`.

// ============================================================================
// IDENTIFIER CONSTANTS
// ============================================================================

/// Separator between the provider prefix and the model suffix
pub const IDENTIFIER_SEPARATOR: char = '/';

/// Provider key used when a bare identifier cannot be attributed to a backend
pub const DEFAULT_PROVIDER_KEY: &str = "custom";

/// Backend that auto-discovery falls back to for the default provider key
pub const AUTO_DISCOVERY_DEFAULT_PROVIDER: &str = "openai";

// ============================================================================
// RETRY CONSTANTS
// ============================================================================

/// HTTP statuses that are retried while attempts remain
pub const RETRYABLE_STATUSES: &[u16] = &[
    408, 409, 425, 429, 500, 502, 503, 504, 507, 508, 509, 520, 521, 522, 523, 524,
];

/// HTTP statuses that are never retried, even inside the 5xx range
pub const NON_RETRYABLE_STATUSES: &[u16] = &[501, 505];

/// Statuses for which a `Retry-After` header is honoured
pub const RETRY_AFTER_STATUSES: &[u16] = &[429, 503];

/// Default number of retries beyond the first attempt
pub const DEFAULT_MAX_RETRIES: u64 = 2;

/// Default base delay for exponential backoff (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Default upper bound for any single backoff delay (milliseconds)
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 30_000;

// ============================================================================
// CONTENT CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Server-sent events content type
pub const CONTENT_TYPE_EVENT_STREAM: &str = "text/event-stream";

/// Frame payload that terminates an event stream
pub const STREAM_DONE_SENTINEL: &str = "[DONE]";

/// Line prefix carrying event-stream payload data
pub const STREAM_DATA_PREFIX: &str = "data:";

// ============================================================================
// CONFIGURATION KEYS
// ============================================================================

/// Target identifier(s): a string or an array of strings
pub const CONFIG_KEY_MODEL: &str = "model";

/// Streaming flag
pub const CONFIG_KEY_STREAM: &str = "stream";

/// Call timeout in milliseconds
pub const CONFIG_KEY_TIMEOUT: &str = "timeout";

/// Retries beyond the first attempt
pub const CONFIG_KEY_MAX_RETRIES: &str = "max_retries";

/// Base backoff delay in milliseconds
pub const CONFIG_KEY_RETRY_DELAY: &str = "retry_delay";

/// Backoff delay cap in milliseconds
pub const CONFIG_KEY_MAX_RETRY_DELAY: &str = "max_retry_delay";

/// Per-provider settings map
pub const CONFIG_KEY_PROVIDERS: &str = "providers";

/// API key override
pub const CONFIG_KEY_API_KEY: &str = "api_key";

/// API base URL override
pub const CONFIG_KEY_API_BASE: &str = "api_base";

/// API path override
pub const CONFIG_KEY_API_PATH: &str = "api_path";
