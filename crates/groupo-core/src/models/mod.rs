pub mod media;
pub mod upload;

pub use media::{MediaItem, MediaKind, SourceHandle};
pub use upload::{PostCreationResult, Tier, Transport, UploadAttempt, UploadTarget};
