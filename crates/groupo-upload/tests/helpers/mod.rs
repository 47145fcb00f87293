//! Test doubles: a scripted transport, a sized fake encoder and media fixtures.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use groupo_api_client::{FileUpload, InlineBody, MediaTransport, TransportError};
use groupo_core::{MediaItem, Transport};
use groupo_processing::{EncodeError, EncodeProfile, EncodedMedia, MediaEncoder};
use groupo_upload::{MediaLibrary, NoLibrary, UploadOrchestrator};
use serde_json::{json, Value};

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Streamed {
        path: String,
        name: String,
        fields: Vec<(String, String)>,
    },
    Inline {
        path: String,
        body: InlineBody,
    },
}

impl Call {
    pub fn path(&self) -> &str {
        match self {
            Call::Streamed { path, .. } | Call::Inline { path, .. } => path,
        }
    }

    pub fn transport(&self) -> Transport {
        match self {
            Call::Streamed { .. } => Transport::Streamed,
            Call::Inline { .. } => Transport::InlineEncoded,
        }
    }
}

type Reply = Result<Value, TransportError>;

/// Transport that answers from per-(transport, path) queues and records every call.
/// Unscripted requests fail with 503.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<(Transport, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streamed(self, path: &str, reply: Reply) -> Self {
        self.push(Transport::Streamed, path, reply);
        self
    }

    pub fn inline(self, path: &str, reply: Reply) -> Self {
        self.push(Transport::InlineEncoded, path, reply);
        self
    }

    fn push(&self, transport: Transport, path: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .entry((transport, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    fn next(&self, transport: Transport, path: &str) -> Reply {
        self.script
            .lock()
            .unwrap()
            .get_mut(&(transport, path.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(unavailable)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.path().to_string()).collect()
    }
}

#[async_trait]
impl MediaTransport for ScriptedTransport {
    async fn post_streamed(
        &self,
        path: &str,
        file: &FileUpload,
        fields: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(Call::Streamed {
            path: path.to_string(),
            name: file.name.clone(),
            fields: fields.to_vec(),
        });
        self.next(Transport::Streamed, path)
    }

    async fn post_inline(&self, path: &str, body: &InlineBody) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(Call::Inline {
            path: path.to_string(),
            body: body.clone(),
        });
        self.next(Transport::InlineEncoded, path)
    }
}

pub fn created(post_id: i64) -> Reply {
    Ok(json!({ "post_id": post_id }))
}

/// 2xx whose body was empty or not JSON.
pub fn accepted_without_body() -> Reply {
    Ok(Value::Null)
}

pub fn attached() -> Reply {
    Ok(json!({ "media": [] }))
}

pub fn unavailable() -> Reply {
    Err(TransportError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    })
}

pub fn network_down() -> Reply {
    Err(TransportError::Connection("connection reset".to_string()))
}

pub fn app_error(message: &str) -> Reply {
    Err(TransportError::Application(message.to_string()))
}

/// Encoder returning payloads of fixed base64 length per profile, or failing
/// for profiles marked with [`FakeEncoder::failing`].
pub struct FakeEncoder {
    high_len: usize,
    low_len: usize,
    failing: Vec<EncodeProfile>,
    calls: Mutex<Vec<EncodeProfile>>,
}

impl FakeEncoder {
    pub fn new(high_len: usize, low_len: usize) -> Self {
        Self {
            high_len,
            low_len,
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make encoding at `profile` fail as an undecodable image would.
    pub fn failing(mut self, profile: EncodeProfile) -> Self {
        self.failing.push(profile);
        self
    }

    /// Both profiles comfortably under the image cap.
    pub fn small() -> Self {
        Self::new(1_000, 400)
    }

    pub fn calls(&self) -> Vec<EncodeProfile> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaEncoder for FakeEncoder {
    async fn encode(
        &self,
        path: &Path,
        name: &str,
        profile: EncodeProfile,
    ) -> Result<EncodedMedia, EncodeError> {
        self.calls.lock().unwrap().push(profile);
        if self.failing.contains(&profile) {
            return Err(EncodeError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "undecodable image",
                ),
            });
        }
        let len = if profile == EncodeProfile::HIGH {
            self.high_len
        } else {
            self.low_len
        };
        Ok(EncodedMedia {
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            data: "A".repeat(len),
        })
    }
}

/// Write a placeholder file and return a selection pointing at it.
pub fn media_file(dir: &Path, name: &str) -> MediaItem {
    let path = dir.join(name);
    std::fs::write(&path, b"placeholder media bytes").unwrap();
    MediaItem::from_uri(path.to_string_lossy().into_owned())
}

pub fn orchestrator(
    transport: &Arc<ScriptedTransport>,
    encoder: &Arc<FakeEncoder>,
) -> UploadOrchestrator {
    orchestrator_with_library(transport, encoder, Arc::new(NoLibrary))
}

pub fn orchestrator_with_library(
    transport: &Arc<ScriptedTransport>,
    encoder: &Arc<FakeEncoder>,
    library: Arc<dyn MediaLibrary>,
) -> UploadOrchestrator {
    UploadOrchestrator::new(transport.clone(), encoder.clone(), library)
}
