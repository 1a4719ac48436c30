use std::sync::Arc;

use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::value_objects::{RequestConfig, TransportResponse};

use crate::ports::provider::Provider;

/// HTTP transport primitive
///
/// Implementations send one request and return the response with its body
/// still unread. Non-2xx statuses are returned as responses, not errors;
/// only failures to obtain a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request
    async fn call(&self, request: &RequestConfig) -> Result<TransportResponse>;
}

/// Auto-discovery loader
///
/// Looks up a provider implementation by key. `Ok(None)` and `Err(_)` both
/// count as a failed load.
#[async_trait]
pub trait ProviderLoader: Send + Sync {
    /// Load the provider registered under `key`
    async fn load(&self, key: &str) -> Result<Option<Arc<dyn Provider>>>;
}
