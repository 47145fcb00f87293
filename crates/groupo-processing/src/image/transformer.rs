//! Image re-encoder - downscales and normalizes images to JPEG for inline uploads.

use crate::compression::EncodeProfile;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageResult};

pub struct ImageReencoder;

impl ImageReencoder {
    /// Decode `data`, fit it inside the profile's bound and write it as JPEG.
    pub fn reencode(data: &[u8], profile: EncodeProfile) -> ImageResult<Bytes> {
        let img = image::load_from_memory(data)?;
        let img = Self::fit(img, profile);

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut buffer = Vec::with_capacity((width * height) as usize / 4);
        JpegEncoder::new_with_quality(&mut buffer, profile.jpeg_quality()).encode_image(&rgb)?;

        tracing::debug!(
            width = width,
            height = height,
            quality = profile.jpeg_quality(),
            size_bytes = buffer.len(),
            "Re-encoded image"
        );

        Ok(Bytes::from(buffer))
    }

    fn fit(img: DynamicImage, profile: EncodeProfile) -> DynamicImage {
        let (width, height) = img.dimensions();
        let (target_w, target_h) = profile.target_dimensions(width, height);
        if (target_w, target_h) == (width, height) {
            return img;
        }
        img.resize(target_w, target_h, FilterType::Lanczos3)
    }
}
