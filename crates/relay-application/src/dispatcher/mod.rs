//! Dispatcher
//!
//! The orchestrator behind every call:
//!
//! 1. merge defaults, global, per-capability and per-call configuration
//! 2. expand the target into an ordered candidate list
//! 3. for each candidate, build a fresh [`CallContext`] (parse, route, build
//!    the request) and run the interceptor pipeline
//! 4. return the first success; otherwise notify and move on, surfacing the
//!    last error once candidates run out
//!
//! [`Dispatcher::call`] resolves once the fallback loop finishes.
//! [`Dispatcher::stream`] returns a lazy sequence whose first pull runs the
//! fallback loop.

mod builder;
mod options;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use http::header::{self, HeaderValue};
use relay_domain::constants::{CONFIG_KEY_STREAM, CONTENT_TYPE_JSON};
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{
    Capability, PayloadStream, RequestBody, RequestConfig, ResponseData,
};
use serde_json::Value;
use tracing::{debug, warn};

pub use builder::DispatcherBuilder;
pub use options::{CallOptions, FallbackHook};

use crate::config::{ConfigMap, ResolvedConfig, config_map, deep_merge};
use crate::context::CallContext;
use crate::execution::CancelHandle;
use crate::pipeline::Pipeline;
use crate::routing::{AutoLoader, RouteEntry, parse_identifier, resolve_route};
use crate::transformers::is_json_media_type;

/// Uniform call surface over every registered backend
///
/// Cheap to clone; clones share the same registration state.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    pipeline: Pipeline<CallContext>,
    routes: Vec<RouteEntry>,
    global: ConfigMap,
    capabilities: HashMap<Capability, ConfigMap>,
    on_fallback: Option<FallbackHook>,
    auto_loader: Arc<AutoLoader>,
}

impl Dispatcher {
    /// Merged configuration and candidate list for a call
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when no target is configured.
    pub fn resolve_config(
        &self,
        capability: &Capability,
        params: &ConfigMap,
    ) -> Result<(ResolvedConfig, Vec<String>)> {
        let merged = deep_merge([
            Some(&self.inner.global),
            self.inner.capabilities.get(capability),
            Some(params),
        ]);
        let config = ResolvedConfig::new(merged);
        let targets = config.targets()?;
        Ok((config, targets))
    }

    /// Perform a call and return its decoded payload
    ///
    /// `params` is the per-call configuration layer and must be a JSON
    /// object (or `null`).
    pub async fn call(
        &self,
        capability: Capability,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        let params = config_map(params)?;
        let (config, targets) = self.resolve_config(&capability, &params)?;
        let ctx = self
            .run_with_fallback(capability, config, targets, options)
            .await?;
        Ok(ctx.response.data)
    }

    /// Perform a streaming call
    ///
    /// Configuration errors are returned immediately. Everything else,
    /// including routing and transport failures, surfaces as an item of the
    /// returned sequence, which does nothing until first polled.
    pub fn stream(
        &self,
        capability: Capability,
        params: Value,
        options: CallOptions,
    ) -> Result<PayloadStream> {
        let mut params = config_map(params)?;
        params.insert(CONFIG_KEY_STREAM.to_owned(), Value::Bool(true));
        let (config, targets) = self.resolve_config(&capability, &params)?;
        let dispatcher = self.clone();

        Ok(Box::pin(async_stream::stream! {
            let outcome = dispatcher
                .run_with_fallback(capability, config, targets, options)
                .await;
            match outcome.map(|ctx| ctx.response.data.map(ResponseData::into_stream)) {
                Err(e) | Ok(Some(Err(e))) => yield Err(e),
                Ok(Some(Ok(mut payloads))) => {
                    while let Some(item) = payloads.next().await {
                        yield item;
                    }
                }
                Ok(None) => {}
            }
        }))
    }

    /// Chat/text completion
    pub async fn completion(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::COMPLETION, params, options).await
    }

    /// Streaming chat/text completion
    pub fn completion_stream(&self, params: Value, options: CallOptions) -> Result<PayloadStream> {
        self.stream(Capability::COMPLETION, params, options)
    }

    /// Vector embeddings
    pub async fn embedding(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::EMBEDDING, params, options).await
    }

    /// Text to speech
    pub async fn speech(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::SPEECH, params, options).await
    }

    /// Speech to text
    pub async fn transcription(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::TRANSCRIPTION, params, options).await
    }

    /// Image generation
    pub async fn image_generation(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::IMAGE_GENERATION, params, options).await
    }

    /// Stateful responses API: create a response
    pub async fn response(
        &self,
        params: Value,
        options: CallOptions,
    ) -> Result<Option<ResponseData>> {
        self.call(Capability::RESPONSE, params, options).await
    }

    async fn run_with_fallback(
        &self,
        capability: Capability,
        config: ResolvedConfig,
        targets: Vec<String>,
        options: CallOptions,
    ) -> Result<CallContext> {
        let cancel = match &options.cancel {
            Some(caller) => caller.with_timeout(config.timeout()),
            None => CancelHandle::timeout(config.timeout()),
        };
        let hook = options
            .on_fallback
            .or_else(|| self.inner.on_fallback.clone());

        let mut last_error = None;
        for (index, target) in targets.iter().enumerate() {
            debug!(
                identifier = %target,
                capability = %capability,
                candidate = index,
                "Dispatching"
            );
            match self.attempt(&capability, &config, target, &cancel).await {
                Ok(ctx) => return Ok(ctx),
                Err(err) => {
                    if let Some(next) = targets.get(index + 1) {
                        warn!(
                            from = %target,
                            to = %next,
                            error = %err,
                            "Falling back to next candidate"
                        );
                        if let Some(hook) = &hook {
                            hook(&err, target, next);
                        }
                    }
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::config("No model specified")))
    }

    async fn attempt(
        &self,
        capability: &Capability,
        config: &ResolvedConfig,
        raw_target: &str,
        cancel: &CancelHandle,
    ) -> Result<CallContext> {
        let target = parse_identifier(raw_target)?;
        let mut ctx = CallContext::new(capability.clone(), config.clone(), target);
        ctx.cancel = Some(cancel.clone());

        resolve_route(&mut ctx, &self.inner.routes, &self.inner.auto_loader).await?;
        prepare_request(&mut ctx)?;

        let result = self.inner.pipeline.run(&mut ctx).await;
        let ended_at = Utc::now();
        ctx.ended_at = Some(ended_at);
        match result {
            Ok(()) => Ok(ctx),
            Err(err) => {
                ctx.error = Some(err.to_string());
                debug!(
                    identifier = %ctx.target,
                    provider = ctx.provider_name(),
                    elapsed_ms = (ended_at - ctx.started_at).num_milliseconds(),
                    error = %err,
                    "Candidate failed"
                );
                Err(err)
            }
        }
    }
}

/// Build the bound handler's request and merge it into the context
///
/// The content type defaults to JSON, and a structured body is serialized
/// to text when the content type is JSON. Multipart bodies carry no content
/// type here; the transport adds one with the boundary.
fn prepare_request(ctx: &mut CallContext) -> Result<()> {
    let handler = ctx
        .handler
        .clone()
        .ok_or_else(|| Error::internal("no handler bound to call context"))?;
    let built = handler.request_config(ctx)?;

    let mut request = std::mem::replace(&mut ctx.request, RequestConfig::post(String::new()));
    request.url = built.url;
    request.method = built.method;
    request.headers.extend(built.headers);
    if built.body.is_some() {
        request.body = built.body;
    }

    let is_form = matches!(request.body, Some(RequestBody::Form(_)));
    if is_form {
        request.headers.remove(header::CONTENT_TYPE);
    } else if !request.headers.contains_key(header::CONTENT_TYPE) {
        request.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON),
        );
    }

    let is_json = request
        .content_type()
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|ct| is_json_media_type(&ct.trim().to_lowercase()));
    if is_json && let Some(RequestBody::Json(value)) = &request.body {
        request.body = Some(RequestBody::Text(serde_json::to_string(value)?));
    }

    ctx.request = request;
    Ok(())
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pipeline", &self.inner.pipeline)
            .field("routes", &self.inner.routes)
            .field("global", &self.inner.global)
            .field("capabilities", &self.inner.capabilities)
            .finish_non_exhaustive()
    }
}
