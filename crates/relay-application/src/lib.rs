//! Application Layer - relay
//!
//! The execution engine behind relay's uniform call surface. A call flows
//! through the layers of this crate in a fixed order:
//!
//! ```text
//! Dispatcher ──► parse identifier ──► resolve route (──► auto-discovery)
//!     ▲                                        │
//!     │                                        ▼
//!  fallback ◄── response transformers ◄── retry controller ◄── interceptors
//! ```
//!
//! ## Modules
//!
//! - [`routing`]: identifier parsing, pattern matching, route resolution and
//!   the auto-discovery cache
//! - [`pipeline`]: onion-style interceptor composition
//! - [`execution`]: cancellation, backoff and the retry controller
//! - [`streaming`]: incremental event-stream decoding
//! - [`transformers`]: built-in response transformers
//! - [`config`]: three-level configuration merge
//! - [`dispatcher`]: the fallback orchestrator and public entry points
//! - [`ports`]: provider, handler, transport and loader interfaces plus the
//!   link-time provider registry
//!
//! ## Dependencies
//!
//! This crate depends only on `relay-domain` and pure Rust libraries. HTTP
//! transports and process configuration live in `relay-infrastructure`.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod execution;
pub mod pipeline;
pub mod ports;
pub mod routing;
pub mod streaming;
pub mod transformers;

pub use context::CallContext;
pub use dispatcher::{CallOptions, Dispatcher, DispatcherBuilder, FallbackHook};
pub use execution::CancelHandle;
pub use pipeline::{Interceptor, Next, Pipeline, compose, interceptor_fn};
pub use ports::*;
pub use routing::{MatchSpec, RouteCondition, RouteEntry, parse_identifier};
