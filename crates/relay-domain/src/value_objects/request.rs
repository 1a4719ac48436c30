//! Outbound request descriptors

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, header};
use serde_json::Value;

/// Body of an outbound request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured body, serialized to text when the content type is JSON
    Json(Value),
    /// Text body sent as-is
    Text(String),
    /// Binary body sent as-is
    Bytes(Bytes),
    /// `multipart/form-data` body; the transport sets the boundary header
    Form(Vec<FormPart>),
}

/// One named part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    /// Field name
    pub name: String,
    /// Field content
    pub value: FormValue,
}

/// Content of a multipart form part
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// File upload
    File {
        /// File name reported to the server
        filename: String,
        /// MIME type of the file, if known
        content_type: Option<String>,
        /// File contents
        data: Bytes,
    },
}

impl FormPart {
    /// Text field
    pub fn text<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    /// File field
    pub fn file<N: Into<String>, F: Into<String>>(
        name: N,
        filename: F,
        content_type: Option<String>,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File {
                filename: filename.into(),
                content_type,
                data,
            },
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<FormPart>> for RequestBody {
    fn from(parts: Vec<FormPart>) -> Self {
        Self::Form(parts)
    }
}

impl From<Bytes> for RequestBody {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

/// HTTP request descriptor built by a provider handler
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Absolute request URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Request headers
    pub headers: HeaderMap,
    /// Optional request body
    pub body: Option<RequestBody>,
}

impl RequestConfig {
    /// Create a request descriptor with no headers or body
    pub fn new<S: Into<String>>(method: Method, url: S) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// `POST` request descriptor
    pub fn post<S: Into<String>>(url: S) -> Self {
        Self::new(Method::POST, url)
    }

    /// `GET` request descriptor
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self::new(Method::GET, url)
    }

    /// `DELETE` request descriptor
    pub fn delete<S: Into<String>>(url: S) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a header, replacing any previous value
    #[must_use]
    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the body
    #[must_use]
    pub fn with_body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Content type header, if present and valid UTF-8
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}
