//! # relay
//!
//! One call surface over many LLM backends. A call names its target as
//! `provider/model` (or a bare model name), is routed to a provider, runs
//! through the interceptor pipeline with retries, and falls back across the
//! configured targets until one succeeds.
//!
//! ## Example
//!
//! ```ignore
//! use relay::{CallOptions, ConfigLoader, build_dispatcher};
//! use serde_json::json;
//!
//! let config = ConfigLoader::new().load()?;
//! let dispatcher = build_dispatcher(&config)?;
//!
//! let reply = dispatcher
//!     .completion(
//!         json!({
//!             "model": ["openai/gpt-4o", "openai/gpt-4o-mini"],
//!             "messages": [{"role": "user", "content": "hello"}],
//!         }),
//!         CallOptions::new(),
//!     )
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error taxonomy, constants and value objects
//! - `application` - routing, pipeline, retries, streaming and the dispatcher
//! - `infrastructure` - configuration, logging and the reqwest transport
//! - `providers` - backends registered into the provider registry

// Force-link relay-providers so its registry entries are present
extern crate relay_providers;

/// Domain layer - core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use relay_domain::*;
}

/// Application layer - the execution engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use relay_application::*;
}

/// Infrastructure layer - config, logging and HTTP transport
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use relay_infrastructure::*;
}

/// Provider implementations
pub mod providers {
    pub use relay_providers::*;
}

pub use relay_domain::{Error, Result};
pub use relay_domain::value_objects::{Capability, ResponseData};

pub use relay_application::{
    CallContext, CallOptions, CancelHandle, Dispatcher, DispatcherBuilder, Interceptor,
    RouteCondition, RouteEntry, interceptor_fn, parse_identifier,
};

pub use relay_infrastructure::{ConfigLoader, RelayConfig, build_dispatcher, dispatcher_builder};
