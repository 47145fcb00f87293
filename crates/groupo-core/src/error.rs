//! Error types module
//!
//! All failures the upload pipeline can observe are unified under [`UploadError`].
//! Each variant maps to a [`FailureKind`], which is what the orchestrator uses to
//! decide between falling back to the next tier and giving up on an item.

use serde::{Deserialize, Serialize};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like selection problems
    Debug,
    /// Warning level - for failures that trigger a fallback
    Warn,
    /// Error level - for failures surfaced to the user
    Error,
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Media reference unreadable; detected before any network call.
    Access,
    /// Non-2xx response or connection failure.
    Transport,
    /// Encoded payload over the inline cap; no request was made.
    SizeExceeded,
    /// 2xx response whose body carries an `error` field.
    Application,
    /// First item accepted but no post id came back.
    MissingIdentifier,
    /// Re-encoding the media failed locally.
    Encode,
    /// The request could not be built (e.g. an unusable MIME type).
    InvalidRequest,
    /// Rejected before any work started (no group, no media, limits).
    InvalidSelection,
}

/// Metadata for error presentation - how an error is shown to the user and logged
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Failure classification used by the orchestrator
    fn kind(&self) -> FailureKind;

    /// Whether a lower tier may still succeed after this error
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Selected media could not be accessed: {uri}")]
    Inaccessible { uri: String },

    #[error("Selected media is not available on this device: {path}")]
    Unavailable { path: String },

    #[error("Upload request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Upload request failed: {0}")]
    Connection(String),

    #[error("Encoded payload too large: {encoded_len} characters (max: {cap})")]
    SizeExceeded { encoded_len: usize, cap: usize },

    #[error("Server rejected upload: {0}")]
    Application(String),

    #[error("Server response did not include a post id")]
    MissingPostId,

    #[error("Failed to re-encode media: {0}")]
    Encode(String),

    #[error("Upload request could not be built: {0}")]
    InvalidRequest(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

impl UploadError {
    /// True for HTTP 401, which callers answer by forcing re-authentication.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, UploadError::HttpStatus { status: 401, .. })
    }
}

/// Static metadata for each variant: (error_code, kind, recoverable, log_level).
fn upload_error_static_metadata(err: &UploadError) -> (&'static str, FailureKind, bool, LogLevel) {
    match err {
        UploadError::Inaccessible { .. } => {
            ("MEDIA_INACCESSIBLE", FailureKind::Access, false, LogLevel::Warn)
        }
        UploadError::Unavailable { .. } => {
            ("MEDIA_UNAVAILABLE", FailureKind::Access, false, LogLevel::Warn)
        }
        UploadError::HttpStatus { .. } => {
            ("TRANSPORT_ERROR", FailureKind::Transport, true, LogLevel::Warn)
        }
        UploadError::Connection(_) => {
            ("CONNECTION_ERROR", FailureKind::Transport, true, LogLevel::Warn)
        }
        UploadError::SizeExceeded { .. } => (
            "PAYLOAD_TOO_LARGE",
            FailureKind::SizeExceeded,
            true,
            LogLevel::Debug,
        ),
        UploadError::Application(_) => (
            "APPLICATION_ERROR",
            FailureKind::Application,
            true,
            LogLevel::Warn,
        ),
        UploadError::MissingPostId => (
            "MISSING_POST_ID",
            FailureKind::MissingIdentifier,
            false,
            LogLevel::Error,
        ),
        UploadError::Encode(_) => ("ENCODE_ERROR", FailureKind::Encode, true, LogLevel::Warn),
        UploadError::InvalidRequest(_) => (
            "INVALID_REQUEST",
            FailureKind::InvalidRequest,
            true,
            LogLevel::Warn,
        ),
        UploadError::InvalidSelection(_) => (
            "INVALID_SELECTION",
            FailureKind::InvalidSelection,
            false,
            LogLevel::Debug,
        ),
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).0
    }

    fn kind(&self) -> FailureKind {
        upload_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::Inaccessible { .. } => "Selected media could not be accessed. Try picking a different item or allow full photo access.".to_string(),
            UploadError::Unavailable { .. } => "Selected media is not available on this device. Try another photo or download it first.".to_string(),
            UploadError::HttpStatus { status: 401, .. } => {
                "Session expired. Please log in again.".to_string()
            }
            UploadError::HttpStatus { status, message } => {
                if message.trim().is_empty() {
                    format!("Upload failed with status {}", status)
                } else {
                    message.clone()
                }
            }
            UploadError::Connection(msg) => format!("Network error: {}", msg),
            UploadError::SizeExceeded { .. } => "Media is too large to upload.".to_string(),
            UploadError::Application(msg) => msg.clone(),
            UploadError::MissingPostId => "Post was not created. Please try again.".to_string(),
            UploadError::Encode(_) => "Selected media could not be processed.".to_string(),
            UploadError::InvalidRequest(_) => {
                "Selected media could not be prepared for upload.".to_string()
            }
            UploadError::InvalidSelection(msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).3
    }
}
