//! Process configuration
//!
//! [`RelayConfig`] is loaded by [`ConfigLoader`] from defaults, an optional
//! TOML file and `RELAY__`-prefixed environment variables. The `defaults`
//! and `capabilities` sections are engine configuration layers handed to the
//! dispatcher builder unchanged.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{HttpConfig, LoggingConfig, RelayConfig};
