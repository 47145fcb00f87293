use serde::{Deserialize, Serialize};

/// Quality level at which an item was accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Low,
}

/// How the bytes travel to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Multipart body streamed from disk.
    Streamed,
    /// Whole file read, base64-encoded and embedded in a JSON body.
    InlineEncoded,
}

/// Endpoint family an item is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadTarget {
    /// First item of a batch; creates the post.
    CreatePost { group_id: i64 },
    /// Subsequent items; attached to an existing post.
    AttachMedia { post_id: i64 },
}

/// One try at sending one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadAttempt {
    pub transport: Transport,
    pub quality_tier: Tier,
    pub target: UploadTarget,
}

/// Post created by a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreationResult {
    pub post_id: i64,
    pub assigned_quality_tier: Tier,
}
