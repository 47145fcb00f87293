//! Media processing for the upload pipeline: classification, naming,
//! re-encoding profiles and inline payload encoding.

pub mod classify;
pub mod compression;
pub mod encoder;
pub mod image;
pub mod inline;

pub use classify::{classify, upload_mime_type, upload_name};
pub use compression::EncodeProfile;
pub use encoder::{EncodeError, EncodedMedia, JpegReencoder, MediaEncoder};
pub use inline::{check_inline_size, inline_cap};
