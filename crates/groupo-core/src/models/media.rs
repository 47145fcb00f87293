use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::constants::is_addressable_library_uri;

/// Media type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// MIME type used when the selection did not declare one.
    pub fn default_mime_type(self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
        }
    }

    /// Extension used when neither the name, the URI nor the MIME type yields one.
    pub fn default_extension(self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

/// Opaque local reference to a selected item.
///
/// `uri` may be directly readable (a path or `file://` URI) or may name a
/// library asset (`ph://`, `assets-library://`), in which case `asset_id` is
/// the stable identifier used to look the asset up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHandle {
    pub uri: String,
    pub asset_id: Option<String>,
}

impl SourceHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            asset_id: None,
        }
    }

    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// Build a handle from a URI, deriving the library asset identifier when the
    /// URI carries one (`ph://<id>` or `assets-library://...?id=<id>`).
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let asset_id = asset_id_from_uri(&uri);
        Self { uri, asset_id }
    }

    pub fn is_addressable(&self) -> bool {
        is_addressable_library_uri(&self.uri)
    }
}

fn asset_id_from_uri(uri: &str) -> Option<String> {
    if let Some(rest) = uri.strip_prefix("ph://") {
        let id = rest.split('?').next().unwrap_or(rest);
        return (!id.is_empty()).then(|| id.to_string());
    }
    if uri.starts_with("assets-library://") {
        let (_, query) = uri.split_once('?')?;
        return query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "id")
            .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
            .filter(|id| !id.is_empty());
    }
    None
}

/// A media item selected by the user for a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub source: SourceHandle,
    pub display_name: String,
    pub declared_mime_type: Option<String>,
    /// Duration reported by the media library, for videos.
    pub duration_ms: Option<u64>,
}

impl MediaItem {
    pub fn new(source: SourceHandle, display_name: impl Into<String>) -> Self {
        Self {
            source,
            display_name: display_name.into(),
            declared_mime_type: None,
            duration_ms: None,
        }
    }

    /// Item named after the last path segment of `uri`.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let source = SourceHandle::from_uri(uri);
        let path = source.uri.split('?').next().unwrap_or(&source.uri);
        let display_name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self::new(source, display_name)
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.declared_mime_type = Some(mime_type.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}
