//! Submission outcome: the single value handed back to the caller.

use groupo_core::{
    ErrorMetadata, FailureKind, MediaKind, PostCreationResult, Tier, UploadAttempt, UploadError,
};
use serde::Serialize;

pub const STATUS_POSTED: &str = "Posted.";
pub const STATUS_DEGRADED: &str = "Uploaded in lower quality due to size.";

/// Terminal state of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemStatus {
    Done { tier: Tier },
    Failed { kind: FailureKind, message: String },
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub index: usize,
    /// Name sent with the upload.
    pub name: String,
    pub kind: Option<MediaKind>,
    pub status: ItemStatus,
}

/// A request that reached the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub item_index: usize,
    pub attempt: UploadAttempt,
    pub failure: Option<FailureKind>,
}

impl AttemptRecord {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub code: &'static str,
    pub message: String,
    pub detail: String,
}

impl From<&UploadError> for FailureReport {
    fn from(err: &UploadError) -> Self {
        Self {
            kind: err.kind(),
            code: err.error_code(),
            message: err.client_message(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionOutcome {
    /// Present whenever the post exists, even if a later item failed.
    pub post: Option<PostCreationResult>,
    pub degraded: bool,
    /// First failure that affected the batch.
    pub failure: Option<UploadError>,
    /// Any attempt was answered with HTTP 401.
    pub unauthorized: bool,
    pub items: Vec<ItemReport>,
    pub attempts: Vec<AttemptRecord>,
}

impl SubmissionOutcome {
    pub fn rejected(err: UploadError, items: Vec<ItemReport>) -> Self {
        Self {
            failure: Some(err),
            items,
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.post.is_some()
    }

    pub fn post_id(&self) -> Option<i64> {
        self.post.map(|p| p.post_id)
    }

    /// Human-readable status line for the caller to display.
    pub fn status_message(&self) -> String {
        if self.unauthorized {
            return "Session expired. Please log in again.".to_string();
        }
        match (&self.failure, self.post) {
            (Some(err), Some(_)) => format!(
                "Post created, but some media failed to upload: {}",
                err.client_message()
            ),
            (Some(err), None) => err.client_message(),
            (None, _) if self.degraded => STATUS_DEGRADED.to_string(),
            (None, _) => STATUS_POSTED.to_string(),
        }
    }

    pub fn report(&self) -> OutcomeReport<'_> {
        OutcomeReport {
            status: self.status_message(),
            success: self.is_success(),
            post: self.post,
            degraded: self.degraded,
            failure: self.failure.as_ref().map(FailureReport::from),
            items: &self.items,
            attempts: &self.attempts,
        }
    }
}

/// Serializable view of a [`SubmissionOutcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    pub status: String,
    pub success: bool,
    pub post: Option<PostCreationResult>,
    pub degraded: bool,
    pub failure: Option<FailureReport>,
    pub items: &'a [ItemReport],
    pub attempts: &'a [AttemptRecord],
}
