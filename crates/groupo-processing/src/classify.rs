//! Media classification and upload naming.
//!
//! Decides whether a selection is a video or an image and derives the file
//! name and MIME type sent to the server.

use std::path::Path;

use groupo_core::constants::VIDEO_EXTENSIONS;
use groupo_core::{MediaItem, MediaKind};

/// Lowercased extension of a name or URI path, ignoring any query string.
pub fn extension_of(name: &str) -> Option<String> {
    let path = name.split('?').next().unwrap_or(name);
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
}

/// Classify an item: declared MIME type first, then the extension heuristic.
pub fn classify(item: &MediaItem) -> MediaKind {
    if let Some(mime) = item.declared_mime_type.as_deref() {
        let mime = mime.to_lowercase();
        if mime.starts_with("video/") {
            return MediaKind::Video;
        }
        if mime.starts_with("image/") {
            return MediaKind::Image;
        }
    }

    let extension = extension_of(&item.display_name).or_else(|| extension_of(&item.source.uri));
    match extension {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
        _ => MediaKind::Image,
    }
}

/// File extension for a known MIME type.
pub fn extension_from_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/heic" => Some("heic"),
        "image/heif" => Some("heif"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        "video/ogg" => Some("ogg"),
        "video/quicktime" => Some("mov"),
        "video/hevc" => Some("hevc"),
        "video/x-m4v" => Some("m4v"),
        _ => None,
    }
}

/// Name sent with the upload.
///
/// Uses the display name when it has an extension, then `upload.<ext>` with the
/// extension taken from the URI, the MIME type, or the media kind, in that order.
pub fn upload_name(item: &MediaItem, kind: MediaKind) -> String {
    if item.display_name.contains('.') {
        return item.display_name.clone();
    }

    let ext = extension_of(&item.source.uri)
        .or_else(|| {
            item.declared_mime_type
                .as_deref()
                .and_then(extension_from_mime)
                .map(str::to_string)
        })
        .unwrap_or_else(|| kind.default_extension().to_string());

    format!("upload.{}", ext)
}

/// MIME type sent with the upload.
pub fn upload_mime_type(item: &MediaItem, kind: MediaKind) -> String {
    item.declared_mime_type
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| kind.default_mime_type().to_string())
}

/// Name for a re-encoded JPEG copy of `name`.
pub fn reencoded_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload");
    format!("{}.jpg", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupo_core::SourceHandle;

    fn item(uri: &str, name: &str) -> MediaItem {
        MediaItem::new(SourceHandle::new(uri), name)
    }

    #[test]
    fn test_classify_by_declared_mime() {
        let video = item("/tmp/clip", "clip").with_mime_type("video/quicktime");
        assert_eq!(classify(&video), MediaKind::Video);

        // Declared image MIME wins over a video-looking extension
        let image = item("/tmp/a.mp4", "a.mp4").with_mime_type("image/png");
        assert_eq!(classify(&image), MediaKind::Image);
    }

    #[test]
    fn test_classify_by_extension() {
        for name in ["a.mp4", "b.MOV", "c.m4v", "d.hevc", "e.webm", "f.ogg"] {
            assert_eq!(classify(&item("/tmp/x", name)), MediaKind::Video, "{}", name);
        }
        assert_eq!(classify(&item("/tmp/x", "photo.heic")), MediaKind::Image);
        assert_eq!(classify(&item("/tmp/clip.mov?x=1", "clip")), MediaKind::Video);
        assert_eq!(classify(&item("/tmp/unknown", "unknown")), MediaKind::Image);
    }

    #[test]
    fn test_upload_name_prefers_display_name() {
        let it = item("/tmp/x.png", "IMG_0001.PNG");
        assert_eq!(upload_name(&it, MediaKind::Image), "IMG_0001.PNG");
    }

    #[test]
    fn test_upload_name_fallbacks() {
        let it = item("file:///tmp/abc.heic?raw=1", "abc");
        assert_eq!(upload_name(&it, MediaKind::Image), "upload.heic");

        let it = item("ph://ASSET", "").with_mime_type("video/quicktime");
        assert_eq!(upload_name(&it, MediaKind::Video), "upload.mov");

        let it = item("ph://ASSET", "");
        assert_eq!(upload_name(&it, MediaKind::Video), "upload.mp4");
        assert_eq!(upload_name(&it, MediaKind::Image), "upload.jpg");
    }

    #[test]
    fn test_upload_mime_type_defaults() {
        assert_eq!(upload_mime_type(&item("/a", "a"), MediaKind::Video), "video/mp4");
        assert_eq!(upload_mime_type(&item("/a", "a"), MediaKind::Image), "image/jpeg");
        let png = item("/a", "a").with_mime_type("image/png");
        assert_eq!(upload_mime_type(&png, MediaKind::Image), "image/png");
    }

    #[test]
    fn test_reencoded_name() {
        assert_eq!(reencoded_name("IMG_0001.HEIC"), "IMG_0001.jpg");
        assert_eq!(reencoded_name("photo"), "photo.jpg");
        assert_eq!(reencoded_name(""), "upload.jpg");
    }
}
