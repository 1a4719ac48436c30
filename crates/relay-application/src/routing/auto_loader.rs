//! Auto-discovery cache
//!
//! Backs the `Auto` route entry. Provider keys are looked up through a
//! [`ProviderLoader`] at most once per process: successes are kept in one map,
//! failures in a negative set, and neither is ever evicted.

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::{DashMap, DashSet};
use relay_domain::constants::{AUTO_DISCOVERY_DEFAULT_PROVIDER, DEFAULT_PROVIDER_KEY};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::ports::{Provider, ProviderLoader, RegistryLoader};

static SHARED: LazyLock<Arc<AutoLoader>> =
    LazyLock::new(|| Arc::new(AutoLoader::new(Arc::new(RegistryLoader))));

/// Cached provider lookup by key
pub struct AutoLoader {
    loader: Arc<dyn ProviderLoader>,
    loaded: DashMap<String, Arc<dyn Provider>>,
    failed: DashSet<String>,
    // Serializes loads so each key reaches the loader at most once.
    load_lock: Mutex<()>,
}

impl AutoLoader {
    /// Create an empty cache over `loader`
    pub fn new(loader: Arc<dyn ProviderLoader>) -> Self {
        Self {
            loader,
            loaded: DashMap::new(),
            failed: DashSet::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Process-wide instance backed by the provider registry
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Map a normalized provider key to the key used for lookup
    ///
    /// The default provider key resolves to the built-in default backend.
    pub fn discovery_key(norm_provider: &str) -> Option<String> {
        if norm_provider.is_empty() {
            return None;
        }
        if norm_provider == DEFAULT_PROVIDER_KEY {
            return Some(AUTO_DISCOVERY_DEFAULT_PROVIDER.to_owned());
        }
        Some(norm_provider.to_lowercase())
    }

    /// Provider registered under `key`, loading it on first use
    pub async fn discover(&self, key: &str) -> Option<Arc<dyn Provider>> {
        if let Some(cached) = self.cached(key) {
            return cached;
        }

        let _guard = self.load_lock.lock().await;
        if let Some(cached) = self.cached(key) {
            return cached;
        }

        debug!(provider = key, "Loading provider for auto-discovery");
        match self.loader.load(key).await {
            Ok(Some(provider)) => {
                self.loaded.insert(key.to_owned(), Arc::clone(&provider));
                Some(provider)
            }
            Ok(None) => {
                warn!(provider = key, "No provider registered; caching negative result");
                self.failed.insert(key.to_owned());
                None
            }
            Err(e) => {
                warn!(provider = key, error = %e, "Provider load failed; caching negative result");
                self.failed.insert(key.to_owned());
                None
            }
        }
    }

    /// Whether `key` previously failed to load
    pub fn is_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    /// Whether `key` is cached as loaded
    pub fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains_key(key)
    }

    fn cached(&self, key: &str) -> Option<Option<Arc<dyn Provider>>> {
        if self.failed.contains(key) {
            return Some(None);
        }
        self.loaded.get(key).map(|p| Some(Arc::clone(p.value())))
    }
}

impl fmt::Debug for AutoLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoLoader")
            .field("loaded", &self.loaded.len())
            .field("failed", &self.failed.len())
            .finish_non_exhaustive()
    }
}
