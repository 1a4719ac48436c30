//! # Infrastructure Layer
//!
//! Process-level concerns around the execution engine.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`constants`] | Centralized infrastructure constants |
//! | [`bootstrap`] | Dispatcher construction from loaded configuration |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Transport
//! | Module | Description |
//! |--------|-------------|
//! | [`http`] | reqwest-backed [`Transport`](relay_application::Transport) |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod http;
pub mod logging;

pub use bootstrap::{build_dispatcher, dispatcher_builder};
pub use config::{ConfigLoader, RelayConfig};
pub use error_ext::ErrorContext;
pub use http::ReqwestTransport;
