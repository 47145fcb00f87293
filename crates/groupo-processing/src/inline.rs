//! Inline (base64) payload encoding and size caps.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use groupo_core::constants::{IMAGE_INLINE_CAP, VIDEO_INLINE_CAP};
use groupo_core::{MediaKind, UploadError};

/// Maximum base64 length accepted for an inline payload of `kind`.
pub fn inline_cap(kind: MediaKind) -> usize {
    match kind {
        MediaKind::Image => IMAGE_INLINE_CAP,
        MediaKind::Video => VIDEO_INLINE_CAP,
    }
}

pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Pre-flight check run before an inline request is sent.
pub fn check_inline_size(encoded_len: usize, kind: MediaKind) -> Result<(), UploadError> {
    let cap = inline_cap(kind);
    if encoded_len > cap {
        return Err(UploadError::SizeExceeded { encoded_len, cap });
    }
    Ok(())
}
