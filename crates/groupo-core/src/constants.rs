//! Limits and well-known values shared across the upload client.

/// Maximum number of media items attached to a single post.
pub const MAX_MEDIA_PER_POST: usize = 20;

/// Maximum accepted video duration, in seconds.
pub const MAX_VIDEO_SECONDS: u64 = 20;

/// Hard cap on the base64 length of an inline image payload.
pub const IMAGE_INLINE_CAP: usize = 700_000;

/// Hard cap on the base64 length of an inline video payload.
pub const VIDEO_INLINE_CAP: usize = 25_000_000;

/// File extensions classified as video when no MIME type is declared.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "hevc", "webm", "ogg"];

/// URI schemes that name a library asset rather than a readable file.
pub const ADDRESSABLE_LIBRARY_SCHEMES: &[&str] = &["ph://", "assets-library://"];

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Returns true when `uri` uses an addressable-library scheme.
pub fn is_addressable_library_uri(uri: &str) -> bool {
    ADDRESSABLE_LIBRARY_SCHEMES
        .iter()
        .any(|scheme| uri.starts_with(scheme))
}
