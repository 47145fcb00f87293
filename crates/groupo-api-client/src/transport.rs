//! Transport primitives used by the upload orchestrator.
//!
//! [`MediaTransport`] is the seam between the pipeline and the network; the
//! orchestrator only ever talks to this trait.

use std::path::PathBuf;

use async_trait::async_trait;
use groupo_core::UploadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to send request: {0}")]
    Connection(String),

    #[error("Failed to open {path}: {message}")]
    File { path: PathBuf, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server returned error: {0}")]
    Application(String),
}

impl From<TransportError> for UploadError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, message } => {
                UploadError::HttpStatus { status, message }
            }
            TransportError::Connection(msg) => UploadError::Connection(msg),
            TransportError::File { path, .. } => UploadError::Unavailable {
                path: path.display().to_string(),
            },
            TransportError::InvalidRequest(msg) => UploadError::InvalidRequest(msg),
            TransportError::Application(msg) => UploadError::Application(msg),
        }
    }
}

/// A local file sent as the `file` part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: String,
}

/// One entry of the `files` array in an inline request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineFile {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Base64 text.
    pub data: String,
}

/// JSON body for the `/base64` endpoints. Caption and group are only sent on
/// post creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub files: Vec<InlineFile>,
}

#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Multipart POST with the file streamed from disk plus string fields.
    async fn post_streamed(
        &self,
        path: &str,
        file: &FileUpload,
        fields: &[(String, String)],
    ) -> Result<Value, TransportError>;

    /// JSON POST with embedded media. A top-level `error` field in a 2xx body is a failure.
    async fn post_inline(&self, path: &str, body: &InlineBody) -> Result<Value, TransportError>;
}

/// Application-level error carried in a response body, if any.
pub fn application_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
