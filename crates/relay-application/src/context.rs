//! Call context
//!
//! The single mutable record threaded through one attempt of one call.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use relay_domain::value_objects::{Capability, ParsedIdentifier, RequestConfig, ResponseHolder};
use serde_json::{Map, Value};

use crate::config::ResolvedConfig;
use crate::execution::CancelHandle;
use crate::ports::{Handler, Provider};

/// Per-candidate call state
///
/// Created fresh for each fallback candidate and never reused across
/// candidates. By the time the pipeline runs, `provider` and `handler` are
/// both bound.
pub struct CallContext {
    /// Kind of operation being performed
    pub capability: Capability,
    /// Merged configuration for the whole call
    pub config: ResolvedConfig,
    /// Outbound request descriptor
    pub request: RequestConfig,
    /// Raw response and decoded payload
    pub response: ResponseHolder,
    /// Parsed target identifier for this candidate
    pub target: ParsedIdentifier,
    /// Bound provider
    pub provider: Option<Arc<dyn Provider>>,
    /// Bound handler
    pub handler: Option<Arc<dyn Handler>>,
    /// Cancellation handle shared by every candidate of the call
    pub cancel: Option<CancelHandle>,
    /// Free-form state for interceptors
    pub state: Map<String, Value>,
    /// When the context was created
    pub started_at: DateTime<Utc>,
    /// When the pipeline finished
    pub ended_at: Option<DateTime<Utc>>,
    /// Failure message of the attempt, if it failed
    pub error: Option<String>,
}

impl CallContext {
    /// Create a context with no provider bound yet
    pub fn new(capability: Capability, config: ResolvedConfig, target: ParsedIdentifier) -> Self {
        Self {
            capability,
            config,
            request: RequestConfig::post(String::new()),
            response: ResponseHolder::default(),
            target,
            provider: None,
            handler: None,
            cancel: None,
            state: Map::new(),
            started_at: Utc::now(),
            ended_at: None,
            error: None,
        }
    }

    /// Name of the bound provider, or the identifier's provider key
    pub fn provider_name(&self) -> &str {
        self.provider
            .as_deref()
            .map_or(self.target.provider_key.as_str(), |p| p.name())
    }

    /// Whether the call consumes the response as a stream
    pub fn is_stream(&self) -> bool {
        self.config.stream()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("capability", &self.capability)
            .field("target", &self.target.id)
            .field("provider", &self.provider.as_deref().map(Provider::name))
            .field("request", &self.request)
            .field("response", &self.response)
            .field("started_at", &self.started_at)
            .field("ended_at", &self.ended_at)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
