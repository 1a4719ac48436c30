//! Port interfaces
//!
//! Contracts between the execution engine and its external collaborators:
//! backends ([`Provider`], [`Handler`], [`ResponseTransformer`]), the HTTP
//! layer ([`Transport`]) and auto-discovery ([`ProviderLoader`]).

/// Provider, handler and transformer interfaces
pub mod provider;
/// Link-time provider registry
pub mod registry;
/// Transport and loader interfaces
pub mod transport;

pub use provider::{Handler, Provider, ResponseTransformer};
pub use registry::{PROVIDERS, ProviderEntry, RegistryLoader, list_providers, resolve_provider};
pub use transport::{ProviderLoader, Transport};
