use groupo_core::Tier;

/// Re-encoding profile for inline uploads.
///
/// Images are downscaled so that neither side exceeds `max_dimension` and then
/// written as JPEG at `quality` (0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeProfile {
    pub max_dimension: u32,
    pub quality: f32,
}

impl EncodeProfile {
    pub const HIGH: EncodeProfile = EncodeProfile {
        max_dimension: 2048,
        quality: 0.9,
    };

    pub const LOW: EncodeProfile = EncodeProfile {
        max_dimension: 700,
        quality: 0.45,
    };

    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::High => Self::HIGH,
            Tier::Low => Self::LOW,
        }
    }

    /// Get quality value for JPEG (1-100)
    pub fn jpeg_quality(self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    /// Dimensions that fit within `max_dimension`, preserving aspect ratio.
    /// Images already inside the bound are left alone.
    pub fn target_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        let longest = width.max(height);
        if longest <= self.max_dimension || longest == 0 {
            return (width, height);
        }
        let scale = self.max_dimension as f64 / longest as f64;
        let scaled = |side: u32| ((side as f64 * scale).round() as u32).max(1);
        (scaled(width), scaled(height))
    }
}
