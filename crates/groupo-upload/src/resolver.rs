//! Asset resolver: library references → readable local files.
//!
//! Resolution never fails; an unresolved reference is returned as-is and
//! rejected later by [`ensure_readable`], before any network call is made.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use groupo_core::constants::is_addressable_library_uri;
use groupo_core::{SourceHandle, UploadError};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Location information the media library holds for an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub local_uri: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Platform media-library index.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn asset_info(&self, asset_id: &str) -> anyhow::Result<AssetInfo>;
}

/// Library with no assets; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLibrary;

#[async_trait]
impl MediaLibrary for NoLibrary {
    async fn asset_info(&self, asset_id: &str) -> anyhow::Result<AssetInfo> {
        Err(anyhow::anyhow!(
            "No media library available to resolve asset {}",
            asset_id
        ))
    }
}

/// Library backed by a JSON index: `{ "<asset id>": { "local_uri": "...", "uri": "..." } }`.
#[derive(Debug, Clone, Default)]
pub struct IndexedLibrary {
    assets: HashMap<String, AssetInfo>,
}

impl IndexedLibrary {
    pub fn new(assets: HashMap<String, AssetInfo>) -> Self {
        Self { assets }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read media library index: {}", path.display()))?;
        let assets: HashMap<String, AssetInfo> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse media library index: {}", path.display()))?;
        Ok(Self::new(assets))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl MediaLibrary for IndexedLibrary {
    async fn asset_info(&self, asset_id: &str) -> anyhow::Result<AssetInfo> {
        self.assets
            .get(asset_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Asset {} not found in media library", asset_id))
    }
}

/// Resolve a selection to the best URI available. Falls back to the original URI.
pub async fn resolve_asset_uri(library: &dyn MediaLibrary, source: &SourceHandle) -> String {
    if !source.is_addressable() {
        return source.uri.clone();
    }
    let Some(asset_id) = source.asset_id.as_deref() else {
        return source.uri.clone();
    };

    match library.asset_info(asset_id).await {
        Ok(info) => info
            .local_uri
            .filter(|u| !u.is_empty())
            .or(info.uri.filter(|u| !u.is_empty()))
            .unwrap_or_else(|| source.uri.clone()),
        Err(err) => {
            tracing::debug!(asset_id = %asset_id, error = %err, "Asset lookup failed");
            source.uri.clone()
        }
    }
}

/// Filesystem path for a `file://` URI or bare path.
pub fn local_path(uri: &str) -> PathBuf {
    match uri.strip_prefix("file://") {
        Some(rest) => PathBuf::from(percent_decode_str(rest).decode_utf8_lossy().into_owned()),
        None => PathBuf::from(uri),
    }
}

/// Reject references that cannot be read locally.
pub async fn ensure_readable(uri: &str) -> Result<PathBuf, UploadError> {
    if is_addressable_library_uri(uri) {
        return Err(UploadError::Inaccessible {
            uri: uri.to_string(),
        });
    }
    let path = local_path(uri);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Ok(path),
        _ => Err(UploadError::Unavailable {
            path: path.display().to_string(),
        }),
    }
}
