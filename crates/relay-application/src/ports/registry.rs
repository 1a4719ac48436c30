//! Provider Registry
//!
//! Auto-registration system for backends using linkme distributed slices.
//! Providers register themselves via `#[linkme::distributed_slice]` and are
//! discovered at runtime by the auto-discovery route.
//!
//! ## Registering a Provider (in relay-providers)
//!
//! ```ignore
//! use relay_application::ports::registry::{PROVIDERS, ProviderEntry};
//!
//! #[linkme::distributed_slice(PROVIDERS)]
//! static ACME_PROVIDER: ProviderEntry = ProviderEntry {
//!     name: "acme",
//!     description: "Acme chat completions",
//!     factory: || Ok(Arc::new(AcmeProvider::new())),
//! };
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use relay_domain::error::{Error, Result};

use crate::ports::provider::Provider;
use crate::ports::transport::ProviderLoader;

/// Registry entry for backends
///
/// Each backend registers itself with this entry using
/// `#[linkme::distributed_slice(PROVIDERS)]`.
pub struct ProviderEntry {
    /// Unique lowercase provider key (e.g., "openai")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the provider instance
    pub factory: fn() -> std::result::Result<Arc<dyn Provider>, String>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static PROVIDERS: [ProviderEntry] = [..];

/// Resolve a provider by key from the registry
///
/// Returns `Ok(None)` when no entry is registered under `name`, and an error
/// when the entry's factory fails.
pub fn resolve_provider(name: &str) -> Result<Option<Arc<dyn Provider>>> {
    let Some(entry) = PROVIDERS.iter().find(|e| e.name == name) else {
        return Ok(None);
    };

    (entry.factory)()
        .map(Some)
        .map_err(|e| Error::config(format!("Failed to create provider '{name}': {e}")))
}

/// List all registered providers
///
/// Returns `(name, description)` pairs.
pub fn list_providers() -> Vec<(&'static str, &'static str)> {
    PROVIDERS.iter().map(|e| (e.name, e.description)).collect()
}

/// [`ProviderLoader`] backed by the link-time registry
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryLoader;

#[async_trait]
impl ProviderLoader for RegistryLoader {
    async fn load(&self, key: &str) -> Result<Option<Arc<dyn Provider>>> {
        resolve_provider(key)
    }
}
