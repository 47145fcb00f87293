//! Inline media encoder: file on disk → re-encoded, base64 payload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use groupo_core::UploadError;

use crate::classify::reencoded_name;
use crate::compression::EncodeProfile;
use crate::image::ImageReencoder;
use crate::inline::encode_base64;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode or encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<EncodeError> for UploadError {
    fn from(err: EncodeError) -> Self {
        UploadError::Encode(err.to_string())
    }
}

/// One file ready to be embedded in an inline request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMedia {
    pub name: String,
    pub mime_type: String,
    /// Base64 text.
    pub data: String,
}

/// Produces inline payloads for a given quality profile.
#[async_trait]
pub trait MediaEncoder: Send + Sync {
    async fn encode(
        &self,
        path: &Path,
        name: &str,
        profile: EncodeProfile,
    ) -> Result<EncodedMedia, EncodeError>;
}

/// Reads the file, re-encodes it to JPEG and base64-encodes the result.
#[derive(Clone, Debug, Default)]
pub struct JpegReencoder;

impl JpegReencoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaEncoder for JpegReencoder {
    async fn encode(
        &self,
        path: &Path,
        name: &str,
        profile: EncodeProfile,
    ) -> Result<EncodedMedia, EncodeError> {
        let data = tokio::fs::read(path).await.map_err(|source| EncodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // Decode/encode is CPU-bound; run off the async pool.
        let encoded = tokio::task::spawn_blocking(move || {
            ImageReencoder::reencode(&data, profile).map(|bytes| encode_base64(&bytes))
        })
        .await??;

        Ok(EncodedMedia {
            name: reencoded_name(name),
            mime_type: "image/jpeg".to_string(),
            data: encoded,
        })
    }
}
