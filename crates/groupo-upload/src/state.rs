//! Explicit per-submission state threaded through the orchestrator.

use groupo_core::{Tier, UploadTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionState {
    pub group_id: i64,
    pub item_index: usize,
    /// Tier of the strategy currently (or last) attempted for the item.
    pub tier_attempted: Option<Tier>,
    /// Set once the first item has created the post.
    pub post_id: Option<i64>,
    /// True once any item was accepted at the Low tier.
    pub degraded: bool,
}

impl SubmissionState {
    pub fn new(group_id: i64) -> Self {
        Self {
            group_id,
            item_index: 0,
            tier_attempted: None,
            post_id: None,
            degraded: false,
        }
    }

    pub fn begin_item(self, item_index: usize) -> Self {
        Self {
            item_index,
            tier_attempted: None,
            ..self
        }
    }

    pub fn attempting(self, tier: Tier) -> Self {
        Self {
            tier_attempted: Some(tier),
            ..self
        }
    }

    pub fn item_done(self, tier: Tier) -> Self {
        Self {
            degraded: self.degraded || tier == Tier::Low,
            ..self
        }
    }

    pub fn post_created(self, post_id: i64) -> Self {
        Self {
            post_id: Some(post_id),
            ..self
        }
    }

    /// Post creation until a post exists, attachment afterwards.
    pub fn target(&self) -> UploadTarget {
        match self.post_id {
            None => UploadTarget::CreatePost {
                group_id: self.group_id,
            },
            Some(post_id) => UploadTarget::AttachMedia { post_id },
        }
    }

    pub fn batch_tier(&self) -> Tier {
        if self.degraded {
            Tier::Low
        } else {
            Tier::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_switches_after_post_created() {
        let state = SubmissionState::new(4);
        assert_eq!(state.target(), UploadTarget::CreatePost { group_id: 4 });
        let state = state.post_created(19).begin_item(1);
        assert_eq!(state.target(), UploadTarget::AttachMedia { post_id: 19 });
    }

    #[test]
    fn test_degraded_is_sticky() {
        let state = SubmissionState::new(1)
            .item_done(Tier::Low)
            .begin_item(1)
            .item_done(Tier::High);
        assert!(state.degraded);
        assert_eq!(state.batch_tier(), Tier::Low);
    }

    #[test]
    fn test_begin_item_clears_tier() {
        let state = SubmissionState::new(1).attempting(Tier::Low).begin_item(2);
        assert_eq!(state.item_index, 2);
        assert_eq!(state.tier_attempted, None);
    }
}
