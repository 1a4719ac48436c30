use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use relay_domain::error::Error;
use relay_domain::value_objects::Capability;

use super::options::FallbackHook;
use super::{Dispatcher, DispatcherInner};
use crate::config::{ConfigMap, deep_merge, defaults};
use crate::context::CallContext;
use crate::execution::RequestInterceptor;
use crate::pipeline::{Interceptor, compose};
use crate::ports::{Provider, Transport};
use crate::routing::{AutoLoader, RouteCondition, RouteEntry};

/// Fluent registration of interceptors, routes and configuration
///
/// ```ignore
/// let dispatcher = DispatcherBuilder::new(transport)
///     .intercept(logging)
///     .route(RouteCondition::provider("acme"), acme)
///     .auto_route()
///     .configure(config_map(json!({"timeout": 30_000}))?)
///     .build();
/// ```
pub struct DispatcherBuilder {
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor<CallContext>>>,
    routes: Vec<RouteEntry>,
    global: ConfigMap,
    capabilities: HashMap<Capability, ConfigMap>,
    on_fallback: Option<FallbackHook>,
    auto_loader: Option<Arc<AutoLoader>>,
}

impl DispatcherBuilder {
    /// Start a builder that sends requests through `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            interceptors: Vec::new(),
            routes: Vec::new(),
            global: defaults(),
            capabilities: HashMap::new(),
            on_fallback: None,
            auto_loader: None,
        }
    }

    /// Register an interceptor; earlier registrations are outer layers
    #[must_use]
    pub fn intercept(mut self, interceptor: Arc<dyn Interceptor<CallContext>>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Bind `provider` when `condition` matches
    #[must_use]
    pub fn route(mut self, condition: RouteCondition, provider: Arc<dyn Provider>) -> Self {
        self.routes.push(RouteEntry::Condition {
            condition,
            provider,
        });
        self
    }

    /// Ask `resolver` for a provider; `None` moves on to the next entry
    #[must_use]
    pub fn route_with<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&CallContext) -> Option<Arc<dyn Provider>> + Send + Sync + 'static,
    {
        self.routes.push(RouteEntry::Resolver(Arc::new(resolver)));
        self
    }

    /// Append an auto-discovery entry to the route chain
    #[must_use]
    pub fn auto_route(mut self) -> Self {
        self.routes.push(RouteEntry::Auto);
        self
    }

    /// Merge into the global configuration layer
    #[must_use]
    pub fn configure(mut self, config: ConfigMap) -> Self {
        self.global = deep_merge([Some(&self.global), Some(&config)]);
        self
    }

    /// Merge into the configuration layer of one capability
    #[must_use]
    pub fn configure_for(mut self, capability: Capability, config: ConfigMap) -> Self {
        let merged = deep_merge([self.capabilities.get(&capability), Some(&config)]);
        self.capabilities.insert(capability, merged);
        self
    }

    /// Dispatcher-wide fallback notification
    #[must_use]
    pub fn on_fallback<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Error, &str, &str) + Send + Sync + 'static,
    {
        self.on_fallback = Some(Arc::new(hook));
        self
    }

    /// Use a dedicated auto-discovery cache instead of the shared one
    #[must_use]
    pub fn auto_loader(mut self, auto_loader: Arc<AutoLoader>) -> Self {
        self.auto_loader = Some(auto_loader);
        self
    }

    /// Compose the pipeline and freeze the registration state
    pub fn build(self) -> Dispatcher {
        let mut layers = self.interceptors;
        layers.push(Arc::new(RequestInterceptor::new(self.transport)));

        Dispatcher {
            inner: Arc::new(DispatcherInner {
                pipeline: compose(layers),
                routes: self.routes,
                global: self.global,
                capabilities: self.capabilities,
                on_fallback: self.on_fallback,
                auto_loader: self.auto_loader.unwrap_or_else(AutoLoader::shared),
            }),
        }
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("interceptors", &self.interceptors.len())
            .field("routes", &self.routes)
            .field("global", &self.global)
            .finish_non_exhaustive()
    }
}
