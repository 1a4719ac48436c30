//! Shared utilities for provider implementations

/// URL path and query helpers
pub mod path;
/// API key, base and path resolution
pub mod resolver;

pub use path::{build_query, join_path};
pub use resolver::{resolve_api_base, resolve_api_key, resolve_api_path};
