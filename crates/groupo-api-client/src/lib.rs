//! HTTP client for the Groupo API.
//!
//! Provides a minimal client with bearer auth, JSON and streamed multipart POST
//! helpers, and the [`MediaTransport`] implementation used by the upload pipeline.

pub mod api;
pub mod transport;

use std::time::Duration;

use anyhow::{Context, Result};
use groupo_core::ClientConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tokio_util::io::ReaderStream;

pub use api::{attach_media_inline_path, attach_media_path, create_post_inline_path, create_post_path};
pub use transport::{
    application_error, FileUpload, InlineBody, InlineFile, MediaTransport, TransportError,
};

/// HTTP client for the Groupo API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Create a client from loaded configuration. Requires a token.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let token = config.require_token()?;
        Self::new(&config.api_url, token, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.token)
    }

    /// POST JSON body and return the parsed JSON response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, TransportError> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).json(body));

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let body = Self::read_json(response).await?;
        if let Some(message) = application_error(&body) {
            return Err(TransportError::Application(message));
        }
        Ok(body)
    }

    /// POST a multipart form with `file` streamed from disk and return the parsed JSON response.
    pub async fn post_multipart_file(
        &self,
        path: &str,
        file: &FileUpload,
        fields: &[(String, String)],
    ) -> Result<Value, TransportError> {
        let part = Self::file_part(file).await?;
        let form = fields
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
            .part("file", part);

        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn file_part(file: &FileUpload) -> Result<Part, TransportError> {
        let open_error = |e: std::io::Error| TransportError::File {
            path: file.path.clone(),
            message: e.to_string(),
        };
        let handle = tokio::fs::File::open(&file.path).await.map_err(open_error)?;
        let length = handle.metadata().await.map_err(open_error)?.len();

        let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));
        Part::stream_with_length(body, length)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                TransportError::InvalidRequest(format!(
                    "Invalid MIME type {}: {}",
                    file.mime_type, e
                ))
            })
    }

    async fn read_json(response: Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&error_text),
            });
        }

        // The server accepted the request; an empty or non-JSON body is not a failure.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Failed to read response body");
                return Ok(Value::Null);
            }
        };
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::debug!(status = status.as_u16(), error = %e, "Response body is not JSON");
            Value::Null
        }))
    }
}

/// Prefer the server's `error` field over the raw body for error messages.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(application_error)
        .unwrap_or_else(|| body.trim().to_string())
}
