use std::sync::Arc;

use http::Method;
use http::header::{self, HeaderValue};
use relay_application::transformers::{BytesTransformer, EventStreamTransformer, JsonTransformer};
use relay_application::{CallContext, Handler, ResponseTransformer};
use relay_domain::constants::{CONFIG_KEY_STREAM, CONTENT_TYPE_JSON};
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{Capability, RequestBody, RequestConfig};
use serde_json::{Map, Value};
use tracing::trace;

use super::{responses, transcription};
use crate::constants::{
    COMPLETION_PARAMS, EMBEDDING_PARAMS, IMAGE_GENERATION_PARAMS, OPENAI_API_KEY_ENV,
    OPENAI_BASE_URL_ENV, OPENAI_COMPLETION_PATH, OPENAI_DEFAULT_BASE, OPENAI_EMBEDDING_PATH,
    OPENAI_IMAGE_GENERATION_PATH, OPENAI_PROVIDER_NAME, OPENAI_RESPONSES_PATH,
    OPENAI_SPEECH_PATH, OPENAI_TRANSCRIPTION_PATH, RESPONSE_COMPACT_PARAMS,
    RESPONSE_CREATE_PARAMS, RESPONSE_INPUT_ITEMS_QUERY, RESPONSE_RETRIEVE_QUERY, SPEECH_PARAMS,
};
use crate::utils::{join_path, resolve_api_base, resolve_api_key, resolve_api_path};

/// API endpoint served by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Chat completions
    Completion,
    /// Embeddings
    Embedding,
    /// Text to speech
    Speech,
    /// Image generation
    ImageGeneration,
    /// Speech to text, uploaded as a multipart form
    Transcription,
    /// Create a response
    ResponseCreate,
    /// Fetch a stored response
    ResponseRetrieve,
    /// Cancel a background response
    ResponseCancel,
    /// Delete a stored response
    ResponseDelete,
    /// Compact a conversation into a new response input
    ResponseCompact,
    /// List the input items of a stored response
    ResponseInputItems,
}

impl Endpoint {
    /// Endpoint serving `capability`, if this provider has one
    pub fn for_capability(capability: &Capability) -> Option<Self> {
        let table = [
            (Capability::COMPLETION, Self::Completion),
            (Capability::EMBEDDING, Self::Embedding),
            (Capability::SPEECH, Self::Speech),
            (Capability::IMAGE_GENERATION, Self::ImageGeneration),
            (Capability::TRANSCRIPTION, Self::Transcription),
            (Capability::RESPONSE, Self::ResponseCreate),
            (Capability::RESPONSE_RETRIEVE, Self::ResponseRetrieve),
            (Capability::RESPONSE_CANCEL, Self::ResponseCancel),
            (Capability::RESPONSE_DELETE, Self::ResponseDelete),
            (Capability::RESPONSE_COMPACT, Self::ResponseCompact),
            (Capability::RESPONSE_INPUT_ITEMS, Self::ResponseInputItems),
        ];
        table
            .into_iter()
            .find(|(cap, _)| cap == capability)
            .map(|(_, endpoint)| endpoint)
    }

    fn method(self) -> Method {
        match self {
            Self::ResponseRetrieve | Self::ResponseInputItems => Method::GET,
            Self::ResponseDelete => Method::DELETE,
            _ => Method::POST,
        }
    }

    /// Path below the base URL, before any `api_path` override
    fn default_path(self, ctx: &CallContext) -> Result<String> {
        let path = match self {
            Self::Completion => OPENAI_COMPLETION_PATH.to_owned(),
            Self::Embedding => OPENAI_EMBEDDING_PATH.to_owned(),
            Self::Speech => OPENAI_SPEECH_PATH.to_owned(),
            Self::ImageGeneration => OPENAI_IMAGE_GENERATION_PATH.to_owned(),
            Self::Transcription => OPENAI_TRANSCRIPTION_PATH.to_owned(),
            Self::ResponseCreate => OPENAI_RESPONSES_PATH.to_owned(),
            Self::ResponseCompact => join_path(OPENAI_RESPONSES_PATH, "compact"),
            Self::ResponseRetrieve | Self::ResponseDelete => responses::stored_path(ctx, "")?,
            Self::ResponseCancel => responses::stored_path(ctx, "cancel")?,
            Self::ResponseInputItems => responses::stored_path(ctx, "input_items")?,
        };
        Ok(path)
    }

    /// Parameters copied into a JSON body; `None` for endpoints without one
    fn params(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Completion => Some(COMPLETION_PARAMS),
            Self::Embedding => Some(EMBEDDING_PARAMS),
            Self::Speech => Some(SPEECH_PARAMS),
            Self::ImageGeneration => Some(IMAGE_GENERATION_PARAMS),
            Self::ResponseCreate => Some(RESPONSE_CREATE_PARAMS),
            Self::ResponseCompact => Some(RESPONSE_COMPACT_PARAMS),
            Self::Transcription
            | Self::ResponseRetrieve
            | Self::ResponseCancel
            | Self::ResponseDelete
            | Self::ResponseInputItems => None,
        }
    }

    fn query_params(self) -> &'static [&'static str] {
        match self {
            Self::ResponseRetrieve => RESPONSE_RETRIEVE_QUERY,
            Self::ResponseInputItems => RESPONSE_INPUT_ITEMS_QUERY,
            _ => &[],
        }
    }

    /// Whether a `stream` flag switches the response to server-sent events
    fn streams(self) -> bool {
        matches!(
            self,
            Self::Completion
                | Self::Speech
                | Self::ImageGeneration
                | Self::Transcription
                | Self::ResponseCreate
                | Self::ResponseRetrieve
        )
    }
}

/// Request builder for one endpoint
#[derive(Debug, Clone, Copy)]
pub struct OpenAiHandler {
    endpoint: Endpoint,
    streaming: bool,
}

impl OpenAiHandler {
    pub fn new(endpoint: Endpoint, streaming: bool) -> Self {
        Self {
            endpoint,
            streaming,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// JSON body: the endpoint's parameters present in the configuration,
    /// plus the model suffix of the identifier
    fn json_body(&self, ctx: &CallContext, params: &[&str]) -> Map<String, Value> {
        let mut body: Map<String, Value> = params
            .iter()
            .filter_map(|key| {
                ctx.config
                    .get(key)
                    .filter(|v| !v.is_null())
                    .map(|v| ((*key).to_owned(), v.clone()))
            })
            .collect();
        body.insert("model".to_owned(), Value::String(ctx.target.model.clone()));

        match self.endpoint {
            Endpoint::Completion => {
                body.entry("messages")
                    .or_insert_with(|| Value::Array(Vec::new()));
            }
            Endpoint::Speech => {
                body.remove(CONFIG_KEY_STREAM);
                let format = if self.streaming { "sse" } else { "audio" };
                body.insert("stream_format".to_owned(), Value::String(format.to_owned()));
            }
            _ => {}
        }
        body
    }

    fn body(&self, ctx: &CallContext) -> Result<Option<RequestBody>> {
        if self.endpoint == Endpoint::Transcription {
            return Ok(Some(RequestBody::Form(transcription::form(ctx)?)));
        }
        Ok(self
            .endpoint
            .params()
            .map(|params| RequestBody::Json(Value::Object(self.json_body(ctx, params)))))
    }
}

impl Handler for OpenAiHandler {
    fn request_config(&self, ctx: &CallContext) -> Result<RequestConfig> {
        let provider = OPENAI_PROVIDER_NAME;
        let base = resolve_api_base(
            ctx,
            provider,
            Some(OPENAI_BASE_URL_ENV),
            Some(OPENAI_DEFAULT_BASE),
        )
        .unwrap_or_default();
        if base.is_empty() {
            return Err(Error::config("No base URL provided"));
        }
        let default_path = self.endpoint.default_path(ctx)?;
        let path = resolve_api_path(ctx, provider, Some(&default_path)).unwrap_or_default();
        let query = responses::query(ctx, self.endpoint.query_params());

        let mut request = RequestConfig::new(
            self.endpoint.method(),
            format!("{}{query}", join_path(&base, &path)),
        );
        match self.body(ctx)? {
            Some(body @ RequestBody::Json(_)) => {
                request = request
                    .with_header(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))
                    .with_body(body);
            }
            Some(body) => request = request.with_body(body),
            None => {}
        }

        if let Some(api_key) = resolve_api_key(ctx, provider, Some(OPENAI_API_KEY_ENV)) {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| Error::config("API key contains invalid header characters"))?;
            value.set_sensitive(true);
            request = request.with_header(header::AUTHORIZATION, value);
        }

        trace!(
            provider,
            endpoint = ?self.endpoint,
            method = %request.method,
            url = %request.url,
            "Built request"
        );
        Ok(request)
    }

    fn response_transformers(&self) -> Vec<Arc<dyn ResponseTransformer>> {
        if self.streaming && self.endpoint.streams() {
            return vec![Arc::new(EventStreamTransformer)];
        }
        match self.endpoint {
            Endpoint::Speech => vec![Arc::new(BytesTransformer)],
            _ => vec![Arc::new(JsonTransformer)],
        }
    }
}
