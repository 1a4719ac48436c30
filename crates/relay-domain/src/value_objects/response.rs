//! Transport responses and decoded payloads

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt, stream};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use serde_json::Value;

use crate::error::{Error, Result};

/// Streamed response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Stream of decoded payloads
pub type PayloadStream = Pin<Box<dyn Stream<Item = Result<Value>> + Send>>;

/// Raw response returned by a transport
///
/// The body is a byte stream that can be consumed exactly once, either by
/// collecting it ([`Self::bytes`], [`Self::text`]) or by taking it
/// ([`Self::take_body`]) for incremental decoding.
pub struct TransportResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    body: Option<ByteStream>,
}

impl TransportResponse {
    /// Create a response with no headers and no body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header; invalid header values are ignored
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Attach a streamed body
    #[must_use]
    pub fn with_stream(mut self, body: ByteStream) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a complete in-memory body
    #[must_use]
    pub fn with_body<B: Into<Bytes>>(self, body: B) -> Self {
        let chunk: Bytes = body.into();
        self.with_stream(Box::pin(stream::once(async move { Ok(chunk) })))
    }

    /// Attach a body delivered as several chunks
    #[must_use]
    pub fn with_chunks<I, B>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let chunks: Vec<Result<Bytes>> = chunks.into_iter().map(|c| Ok(c.into())).collect();
        self.with_stream(Box::pin(stream::iter(chunks)))
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Header value as text, if present and valid UTF-8
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Content type header
    pub fn content_type(&self) -> Option<&str> {
        self.header(&header::CONTENT_TYPE)
    }

    /// Whether a body is still attached
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Detach the body stream, leaving the response bodiless
    pub fn take_body(&mut self) -> Option<ByteStream> {
        self.body.take()
    }

    /// Collect the remaining body into memory
    ///
    /// Returns empty bytes when there is no body or it was already consumed.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        let Some(mut body) = self.body.take() else {
            return Ok(Bytes::new());
        };
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Collect the remaining body as text, replacing invalid UTF-8
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Decoded response payload
pub enum ResponseData {
    /// Parsed JSON document
    Json(Value),
    /// Plain text
    Text(String),
    /// Binary content
    Bytes(Bytes),
    /// Lazily decoded event stream
    Stream(PayloadStream),
}

impl ResponseData {
    /// JSON document, if this is one
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a payload stream
    ///
    /// A JSON or text payload becomes a single-item stream. Binary content
    /// cannot be streamed as payloads.
    pub fn into_stream(self) -> Result<PayloadStream> {
        match self {
            Self::Stream(s) => Ok(s),
            Self::Json(value) => Ok(Box::pin(stream::once(async move { Ok(value) }))),
            Self::Text(text) => Ok(Box::pin(stream::once(async move {
                Ok(Value::String(text))
            }))),
            Self::Bytes(_) => Err(Error::internal(
                "binary response cannot be consumed as a payload stream",
            )),
        }
    }
}

impl fmt::Debug for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Response slot of a call context
///
/// `raw` is filled by the transport on success; `data` by the response
/// transformers.
#[derive(Debug, Default)]
pub struct ResponseHolder {
    /// Successful transport response
    pub raw: Option<TransportResponse>,
    /// Decoded payload
    pub data: Option<ResponseData>,
}
