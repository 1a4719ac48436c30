//! reqwest-backed transport

use async_trait::async_trait;
use futures::TryStreamExt;
use relay_application::Transport;
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{
    ByteStream, FormPart, FormValue, RequestBody, RequestConfig, TransportResponse,
};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::trace;

use crate::config::HttpConfig;
use crate::error_ext::ErrorContext;

/// Sends request descriptors with a pooled [`reqwest::Client`]
///
/// Response bodies are handed back unread as byte streams, so event streams
/// are decoded incrementally and error bodies are read only when needed.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client from `config`
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .network_context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, request: &RequestConfig) -> Result<TransportResponse> {
        trace!(method = %request.method, url = %request.url, "Sending request");

        let mut headers = request.headers.clone();
        if matches!(request.body, Some(RequestBody::Form(_))) {
            headers.remove(CONTENT_TYPE);
        }
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.as_str())
            .headers(headers);
        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            Some(RequestBody::Form(parts)) => builder.multipart(multipart_form(parts)?),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .network_context(format!("Request to {} failed", request.url))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body: ByteStream = Box::pin(response.bytes_stream().map_err(|e| {
            Error::transport_with_source("Failed to read response body", e)
        }));

        let mut transport_response = TransportResponse::new(status).with_stream(body);
        transport_response.headers = headers;
        Ok(transport_response)
    }
}

/// reqwest form for multipart parts
fn multipart_form(parts: &[FormPart]) -> Result<Form> {
    parts.iter().try_fold(Form::new(), |form, part| {
        let name = part.name.clone();
        Ok(match &part.value {
            FormValue::Text(text) => form.text(name, text.clone()),
            FormValue::File {
                filename,
                content_type,
                data,
            } => {
                let mut file = Part::bytes(data.to_vec()).file_name(filename.clone());
                if let Some(content_type) = content_type {
                    file = file
                        .mime_str(content_type)
                        .config_context(format!("Invalid content type for part {name}"))?;
                }
                form.part(name, file)
            }
        })
    })
}
