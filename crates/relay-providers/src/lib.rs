//! # relay - Provider Implementations
//!
//! Backends that register themselves into the link-time provider registry,
//! plus the request-building helpers they share.
//!
//! | Provider | Key | Capabilities |
//! |----------|-----|--------------|
//! | [`OpenAiProvider`] | `openai` | completion, embedding, speech, transcription, image generation, responses |
//!
//! Linking this crate is enough for auto-discovery to find its providers:
//!
//! ```ignore
//! extern crate relay_providers;
//! ```

/// Provider-specific constants
pub mod constants;

/// OpenAI-compatible backend
pub mod openai;

/// Shared request-building helpers
pub mod utils;

pub use openai::OpenAiProvider;
pub use utils::{build_query, join_path, resolve_api_base, resolve_api_key, resolve_api_path};
