//! Ordered attempt strategies per media kind.

use groupo_core::{MediaKind, Tier, Transport, UploadAttempt, UploadError, UploadTarget};
use serde_json::Value;

/// One way of sending an item, tried in list order until one succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStrategy {
    /// Multipart body streamed from the original file.
    Streamed,
    /// Re-encoded at the tier's profile and embedded as base64.
    Inline(Tier),
}

const IMAGE_STRATEGIES: &[AttemptStrategy] = &[
    AttemptStrategy::Streamed,
    AttemptStrategy::Inline(Tier::High),
    AttemptStrategy::Inline(Tier::Low),
];

// Videos are never re-encoded or inlined.
const VIDEO_STRATEGIES: &[AttemptStrategy] = &[AttemptStrategy::Streamed];

/// Strategies for `kind`, highest quality first.
pub fn strategies_for(kind: MediaKind) -> &'static [AttemptStrategy] {
    match kind {
        MediaKind::Image => IMAGE_STRATEGIES,
        MediaKind::Video => VIDEO_STRATEGIES,
    }
}

impl AttemptStrategy {
    pub fn transport(self) -> Transport {
        match self {
            AttemptStrategy::Streamed => Transport::Streamed,
            AttemptStrategy::Inline(_) => Transport::InlineEncoded,
        }
    }

    /// Tier assigned when this strategy succeeds.
    pub fn tier(self) -> Tier {
        match self {
            AttemptStrategy::Streamed => Tier::High,
            AttemptStrategy::Inline(tier) => tier,
        }
    }

    pub fn attempt(self, target: UploadTarget) -> UploadAttempt {
        UploadAttempt {
            transport: self.transport(),
            quality_tier: self.tier(),
            target,
        }
    }
}

/// Tagged result of evaluating one strategy.
#[derive(Debug, Clone)]
pub enum AttemptResult {
    Success { tier: Tier, body: Value },
    Failure(UploadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_strategies_high_first() {
        let tiers: Vec<_> = strategies_for(MediaKind::Image)
            .iter()
            .map(|s| (s.transport(), s.tier()))
            .collect();
        assert_eq!(
            tiers,
            vec![
                (Transport::Streamed, Tier::High),
                (Transport::InlineEncoded, Tier::High),
                (Transport::InlineEncoded, Tier::Low),
            ]
        );
    }

    #[test]
    fn test_video_has_single_streamed_strategy() {
        assert_eq!(
            strategies_for(MediaKind::Video),
            &[AttemptStrategy::Streamed]
        );
    }

    #[test]
    fn test_attempt_descriptor() {
        let target = UploadTarget::AttachMedia { post_id: 3 };
        let attempt = AttemptStrategy::Inline(Tier::Low).attempt(target);
        assert_eq!(attempt.transport, Transport::InlineEncoded);
        assert_eq!(attempt.quality_tier, Tier::Low);
        assert_eq!(attempt.target, target);
    }
}
