//! Built-in response transformers
//!
//! | Transformer | Applies when | Produces |
//! |-------------|--------------|----------|
//! | [`JsonTransformer`] | `Content-Type: application/json` | [`ResponseData::Json`] |
//! | [`EventStreamTransformer`] | `Content-Type: text/event-stream` | [`ResponseData::Stream`] |
//! | [`BytesTransformer`] | always | [`ResponseData::Bytes`] |
//!
//! [`ResponseData::Json`]: relay_domain::value_objects::ResponseData::Json
//! [`ResponseData::Stream`]: relay_domain::value_objects::ResponseData::Stream
//! [`ResponseData::Bytes`]: relay_domain::value_objects::ResponseData::Bytes

/// Binary transformer
pub mod bytes;
/// Event-stream transformer
pub mod event_stream;
/// JSON transformer
pub mod json;

use std::sync::Arc;

use relay_domain::constants::{CONTENT_TYPE_EVENT_STREAM, CONTENT_TYPE_JSON};
use relay_domain::value_objects::TransportResponse;

pub use self::bytes::BytesTransformer;
pub use event_stream::EventStreamTransformer;
pub use json::JsonTransformer;

use crate::ports::ResponseTransformer;

/// Transformers used when a handler declares none
pub fn auto_transformers() -> Vec<Arc<dyn ResponseTransformer>> {
    vec![Arc::new(JsonTransformer), Arc::new(EventStreamTransformer)]
}

/// Lowercased media type of a response, without parameters
pub fn media_type(response: &TransportResponse) -> String {
    response
        .content_type()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_lowercase())
        .unwrap_or_default()
}

/// Whether the media type is JSON
pub fn is_json_media_type(media_type: &str) -> bool {
    media_type == CONTENT_TYPE_JSON
}

/// Whether the media type is an event stream
pub fn is_event_stream_media_type(media_type: &str) -> bool {
    media_type.starts_with(CONTENT_TYPE_EVENT_STREAM)
}
