//! Endpoint paths for the post/media service and the [`MediaTransport`]
//! implementation over [`ApiClient`].

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{FileUpload, InlineBody, MediaTransport, TransportError};
use crate::ApiClient;

/// Multipart post creation: `file` + `content`.
pub fn create_post_path(group_id: i64) -> String {
    format!("/api/groups/{}/posts", group_id)
}

/// Inline post creation: `{ content, files }`.
pub fn create_post_inline_path(group_id: i64) -> String {
    format!("/api/groups/{}/posts/base64", group_id)
}

/// Multipart attach of a single file to an existing post.
pub fn attach_media_path(post_id: i64) -> String {
    format!("/api/posts/{}/media", post_id)
}

/// Inline attach: `{ files }`.
pub fn attach_media_inline_path(post_id: i64) -> String {
    format!("/api/posts/{}/media/base64", post_id)
}

#[async_trait]
impl MediaTransport for ApiClient {
    async fn post_streamed(
        &self,
        path: &str,
        file: &FileUpload,
        fields: &[(String, String)],
    ) -> Result<Value, TransportError> {
        tracing::debug!(path = %path, file = %file.name, "Streaming multipart upload");
        self.post_multipart_file(path, file, fields).await
    }

    async fn post_inline(&self, path: &str, body: &InlineBody) -> Result<Value, TransportError> {
        tracing::debug!(path = %path, files = body.files.len(), "Posting inline media");
        self.post_json(path, body).await
    }
}
