//! Event-stream decoding

/// Incremental frame decoder
pub mod decoder;

pub use decoder::{FrameBuffer, decode_event_stream, parse_payload};
