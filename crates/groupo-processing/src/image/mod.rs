//! Image processing module
//!
//! Re-encoding of selected images into bounded JPEG copies for inline uploads.

pub mod transformer;

pub use transformer::ImageReencoder;
