//! Provider Constants
//!
//! Constants specific to provider implementations. Engine constants live in
//! `relay_domain::constants`.

// ============================================================================
// OPENAI CONSTANTS
// ============================================================================

/// Registry key of the OpenAI provider
pub const OPENAI_PROVIDER_NAME: &str = "openai";

/// Default OpenAI API base URL
pub const OPENAI_DEFAULT_BASE: &str = "https://api.openai.com/v1";

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the OpenAI API base URL
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Chat completions endpoint path
pub const OPENAI_COMPLETION_PATH: &str = "/chat/completions";

/// Embeddings endpoint path
pub const OPENAI_EMBEDDING_PATH: &str = "/embeddings";

/// Text-to-speech endpoint path
pub const OPENAI_SPEECH_PATH: &str = "/audio/speech";

/// Image generation endpoint path
pub const OPENAI_IMAGE_GENERATION_PATH: &str = "/images/generations";

/// Speech-to-text endpoint path
pub const OPENAI_TRANSCRIPTION_PATH: &str = "/audio/transcriptions";

/// Responses API collection path; single responses live under `/responses/{id}`
pub const OPENAI_RESPONSES_PATH: &str = "/responses";

/// Configuration key naming the stored response for the responses API
pub const RESPONSE_ID_KEY: &str = "response_id";

// ============================================================================
// REQUEST PARAMETERS
// ============================================================================

/// Chat completion parameters copied from the configuration when present
pub const COMPLETION_PARAMS: &[&str] = &[
    "messages",
    "audio",
    "functions",
    "function_call",
    "logit_bias",
    "logprobs",
    "max_completion_tokens",
    "max_tokens",
    "metadata",
    "modalities",
    "n",
    "parallel_tool_calls",
    "prediction",
    "presence_penalty",
    "frequency_penalty",
    "prompt_cache_key",
    "prompt_cache_retention",
    "reasoning_effort",
    "response_format",
    "safety_identifier",
    "seed",
    "service_tier",
    "stop",
    "store",
    "stream",
    "stream_options",
    "temperature",
    "tool_choice",
    "tools",
    "top_logprobs",
    "top_p",
    "user",
    "verbosity",
    "web_search_options",
];

/// Embedding parameters copied from the configuration when present
pub const EMBEDDING_PARAMS: &[&str] = &["input", "dimensions", "encoding_format", "user"];

/// Speech parameters copied from the configuration when present
pub const SPEECH_PARAMS: &[&str] = &["input", "voice", "instructions", "response_format", "speed"];

/// Image generation parameters copied from the configuration when present
pub const IMAGE_GENERATION_PARAMS: &[&str] = &[
    "prompt",
    "background",
    "moderation",
    "n",
    "output_compression",
    "output_format",
    "partial_images",
    "quality",
    "response_format",
    "size",
    "stream",
    "style",
    "user",
];

/// Transcription form fields sent after `file` and `model`
pub const TRANSCRIPTION_PARAMS: &[&str] = &[
    "chunking_strategy",
    "include",
    "known_speaker_names",
    "known_speaker_references",
    "language",
    "prompt",
    "response_format",
    "stream",
    "temperature",
    "timestamp_granularities",
];

/// Response creation parameters copied from the configuration when present
pub const RESPONSE_CREATE_PARAMS: &[&str] = &[
    "background",
    "context_management",
    "conversation",
    "include",
    "input",
    "instructions",
    "max_output_tokens",
    "metadata",
    "parallel_tool_calls",
    "previous_response_id",
    "prompt",
    "prompt_cache_key",
    "prompt_cache_retention",
    "reasoning",
    "safety_identifier",
    "service_tier",
    "store",
    "stream",
    "stream_options",
    "temperature",
    "text",
    "tool_choice",
    "tools",
    "top_p",
    "truncation",
    "user",
];

/// Response compaction parameters copied from the configuration when present
pub const RESPONSE_COMPACT_PARAMS: &[&str] =
    &["input", "instructions", "previous_response_id"];

/// Query parameters for retrieving a stored response
pub const RESPONSE_RETRIEVE_QUERY: &[&str] =
    &["include", "include_obfuscation", "starting_after", "stream"];

/// Query parameters for listing a response's input items
pub const RESPONSE_INPUT_ITEMS_QUERY: &[&str] = &["include", "order", "after", "limit"];
