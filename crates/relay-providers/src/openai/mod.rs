//! OpenAI-compatible provider
//!
//! | Capability | Endpoint | Response |
//! |------------|----------|----------|
//! | `completion` | `POST {base}/chat/completions` | JSON, or event stream when `stream` is set |
//! | `embedding` | `POST {base}/embeddings` | JSON |
//! | `speech` | `POST {base}/audio/speech` | binary audio, or event stream when `stream` is set |
//! | `image_generation` | `POST {base}/images/generations` | JSON, or event stream when `stream` is set |
//! | `transcription` | `POST {base}/audio/transcriptions` (multipart) | JSON, or event stream when `stream` is set |
//! | `response` | `POST {base}/responses` | JSON, or event stream when `stream` is set |
//! | `response.retrieve` | `GET {base}/responses/{response_id}` | JSON, or event stream when `stream` is set |
//! | `response.cancel` | `POST {base}/responses/{response_id}/cancel` | JSON |
//! | `response.delete` | `DELETE {base}/responses/{response_id}` | JSON |
//! | `response.compact` | `POST {base}/responses/compact` | JSON |
//! | `response.input_items` | `GET {base}/responses/{response_id}/input_items` | JSON |
//!
//! The base URL comes from `api_base`, `providers.openai.api_base`,
//! `OPENAI_BASE_URL` or the public API, in that order. Any server speaking the
//! same protocol can be targeted by overriding it.

mod handler;
mod responses;
mod transcription;

use std::sync::Arc;

use relay_application::ports::registry::{PROVIDERS, ProviderEntry};
use relay_application::{CallContext, Handler, Provider};

pub use handler::{Endpoint, OpenAiHandler};

use crate::constants::OPENAI_PROVIDER_NAME;

/// OpenAI-compatible backend
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiProvider;

impl OpenAiProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        OPENAI_PROVIDER_NAME
    }

    fn handler(&self, ctx: &CallContext) -> Option<Arc<dyn Handler>> {
        let endpoint = Endpoint::for_capability(&ctx.capability)?;
        Some(Arc::new(OpenAiHandler::new(endpoint, ctx.is_stream())))
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PROVIDERS)]
static OPENAI_PROVIDER: ProviderEntry = ProviderEntry {
    name: OPENAI_PROVIDER_NAME,
    description: "OpenAI-compatible chat, embeddings, audio, images and responses",
    factory: || Ok(Arc::new(OpenAiProvider::new())),
};
