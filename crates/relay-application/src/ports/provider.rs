use std::sync::Arc;

use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::value_objects::RequestConfig;

use crate::context::CallContext;

/// Backend capability source
///
/// One implementation per backend. A provider exposes a [`Handler`] for each
/// capability it supports and returns `None` for the rest.
///
/// # Example
///
/// ```ignore
/// struct Acme;
///
/// impl Provider for Acme {
///     fn name(&self) -> &str {
///         "acme"
///     }
///
///     fn handler(&self, ctx: &CallContext) -> Option<Arc<dyn Handler>> {
///         (ctx.capability == Capability::COMPLETION).then(|| Arc::new(AcmeChat) as _)
///     }
/// }
/// ```
pub trait Provider: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &str;

    /// Handler for the context's capability, if supported
    fn handler(&self, ctx: &CallContext) -> Option<Arc<dyn Handler>>;
}

/// Per-capability request builder and response mapping
pub trait Handler: Send + Sync {
    /// Build the outbound request for this call
    fn request_config(&self, ctx: &CallContext) -> Result<RequestConfig>;

    /// Ordered transformers that decode the raw response
    ///
    /// An empty list selects the automatic JSON / event-stream pair.
    fn response_transformers(&self) -> Vec<Arc<dyn ResponseTransformer>> {
        Vec::new()
    }
}

/// Step that reads the raw response and writes the decoded payload
#[async_trait]
pub trait ResponseTransformer: Send + Sync {
    /// Decode `ctx.response.raw` into `ctx.response.data`
    async fn transform(&self, ctx: &mut CallContext) -> Result<()>;
}
