//! Provider inference for bare model names

use std::collections::HashMap;
use std::sync::LazyLock;

use relay_domain::constants::DEFAULT_PROVIDER_KEY;

/// Popular model names mapped to their provider
static MODEL_PROVIDERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    const OPENAI_MODELS: &[&str] = &[
        "gpt-5.2",
        "gpt-5.1",
        "gpt-5",
        "gpt-5-mini",
        "gpt-5-nano",
        "gpt-5.2-codex",
        "gpt-5.1-codex",
        "gpt-5.1-codex-max",
        "gpt-5.1-codex-mini",
        "gpt-5-codex",
        "gpt-5.2-pro",
        "gpt-5-pro",
        "gpt-5.2-chat",
        "gpt-5.1-chat",
        "gpt-5-chat",
        "sora-2",
        "sora-2-pro",
        "gpt-4.1",
        "gpt-4.1-mini",
        "gpt-4.1-nano",
        "gpt-4o",
        "gpt-4o-audio",
        "gpt-4o-mini",
        "gpt-4o-mini-audio",
        "gpt-4o-realtime",
        "gpt-4o-mini-realtime",
        "gpt-4o-transcribe",
        "gpt-4o-transcribe-diarize",
        "gpt-4o-mini-transcribe",
        "gpt-4o-mini-tts",
        "gpt-4o-search-preview",
        "gpt-4o-mini-search-preview",
        "gpt-4-turbo",
        "gpt-4",
        "gpt-3.5-turbo",
        "o1",
        "o1-pro",
        "o3",
        "o3-mini",
        "o3-pro",
        "o3-deep-research",
        "o4-mini",
        "o4-mini-deep-research",
        "omni-moderation",
        "computer-use-preview",
        "text-embedding-3-large",
        "text-embedding-3-small",
        "text-embedding-ada-002",
        "tts-1",
        "tts-1-hd",
        "whisper",
        "gpt-audio",
        "gpt-audio-mini",
        "gpt-realtime",
        "gpt-realtime-mini",
        "gpt-oss-120b",
        "gpt-oss-20b",
        "chatgpt-image-latest",
        "gpt-image-1.5",
        "gpt-image-1",
        "gpt-image-1-mini",
    ];
    OPENAI_MODELS.iter().map(|m| (*m, "openai")).collect()
});

/// Model-name prefixes that identify OpenAI models
const OPENAI_PREFIXES: &[&str] = &[
    "gpt-",
    "sora-",
    "chatgpt-",
    "o1-",
    "o3-",
    "o4-",
    "babbage-",
    "dall-e",
    "codex-",
    "text-embedding-",
    "text-moderation",
    "tts-",
    "whisper",
];

/// Infer the provider key for a bare model name
///
/// Exact table lookup first, then known naming conventions, then the
/// default provider key. The result is always lowercase.
pub fn infer_provider(model: &str) -> &'static str {
    let model = model.to_lowercase();
    if let Some(provider) = MODEL_PROVIDERS.get(model.as_str()) {
        return provider;
    }
    if OPENAI_PREFIXES.iter().any(|p| model.starts_with(p)) {
        return "openai";
    }
    DEFAULT_PROVIDER_KEY
}
