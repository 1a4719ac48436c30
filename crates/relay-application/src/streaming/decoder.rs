//! Incremental event-stream decoder
//!
//! Splits a byte stream into blank-line separated frames, joins each frame's
//! `data:` lines and yields one payload per frame until the end-of-stream
//! sentinel.

use futures::StreamExt;
use relay_domain::constants::{STREAM_DATA_PREFIX, STREAM_DONE_SENTINEL};
use relay_domain::value_objects::{ByteStream, PayloadStream};
use serde_json::Value;

use crate::execution::CancelHandle;

/// Byte buffer that yields complete frames
///
/// `\r\n` line endings are normalized to `\n` as bytes arrive, including
/// when the pair is split across chunks.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
    pending_cr: bool,
}

impl FrameBuffer {
    /// Append a chunk
    pub fn push(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            if self.pending_cr {
                self.pending_cr = false;
                if byte != b'\n' {
                    self.buf.push(b'\r');
                }
            }
            if byte == b'\r' {
                self.pending_cr = true;
            } else {
                self.buf.push(byte);
            }
        }
    }

    /// Remove and return the next complete frame, without its delimiter
    pub fn next_frame(&mut self) -> Option<String> {
        let end = self.buf.windows(2).position(|w| w == b"\n\n")?;
        let frame: Vec<u8> = self.buf.drain(..end + 2).take(end).collect();
        Some(String::from_utf8_lossy(&frame).into_owned())
    }

    /// Bytes buffered after the last complete frame
    pub fn remaining(&self) -> usize {
        self.buf.len() + usize::from(self.pending_cr)
    }
}

/// Joined `data:` lines of a frame, or `None` if it has none
fn frame_data(frame: &str) -> Option<String> {
    let lines: Vec<&str> = frame
        .split('\n')
        .filter_map(|line| line.strip_prefix(STREAM_DATA_PREFIX))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Best-effort structured parse of one frame payload
///
/// Only text wrapped in `{}` or `[]` is parsed. A failed parse yields the
/// trimmed text; unwrapped text is yielded unchanged.
pub fn parse_payload(data: String) -> Value {
    let trimmed = data.trim();
    let wrapped = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if !wrapped {
        return Value::String(data);
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned()))
}

/// Decode an event-stream body into a lazy payload sequence
///
/// Nothing is read until the first pull. With a cancellation handle, a pull
/// after the handle fires yields the abort error and ends the sequence.
pub fn decode_event_stream(body: ByteStream, cancel: Option<CancelHandle>) -> PayloadStream {
    Box::pin(async_stream::stream! {
        let mut body = body;
        let mut frames = FrameBuffer::default();

        'read: loop {
            let next = match &cancel {
                Some(cancel) => tokio::select! {
                    biased;
                    reason = cancel.aborted() => Err(cancel.abort_error(reason)),
                    chunk = body.next() => Ok(chunk),
                },
                None => Ok(body.next().await),
            };

            let chunk = match next {
                Ok(Some(Ok(chunk))) => chunk,
                Ok(None) => break 'read,
                Ok(Some(Err(e))) | Err(e) => {
                    yield Err(e);
                    break 'read;
                }
            };

            frames.push(&chunk);
            while let Some(frame) = frames.next_frame() {
                let Some(data) = frame_data(&frame) else {
                    continue;
                };
                if data.trim() == STREAM_DONE_SENTINEL {
                    break 'read;
                }
                yield Ok(parse_payload(data));
            }
        }
    })
}
