//! Upload orchestrator: resolve → classify → tiered attempts → batch sequencing.
//!
//! Items are processed strictly one after another. The first item creates the
//! post; the rest are attached to it. Within an item, strategies run in order
//! (streamed, inline high, inline low for images; streamed only for videos) and
//! the first success wins.

use std::path::PathBuf;
use std::sync::Arc;

use groupo_api_client::{
    attach_media_inline_path, attach_media_path, create_post_inline_path, create_post_path,
    FileUpload, InlineBody, InlineFile, MediaTransport,
};
use groupo_core::{
    ErrorMetadata, LogLevel, MediaItem, MediaKind, PostCreationResult, Tier, UploadError,
    UploadTarget,
};
use groupo_processing::{
    check_inline_size, classify, upload_mime_type, upload_name, EncodeProfile, MediaEncoder,
};
use serde_json::Value;

use crate::outcome::{AttemptRecord, ItemReport, ItemStatus, SubmissionOutcome};
use crate::resolver::{ensure_readable, resolve_asset_uri, MediaLibrary};
use crate::selection::{validate_request, PostRequest};
use crate::state::SubmissionState;
use crate::strategy::{strategies_for, AttemptResult, AttemptStrategy};

/// An item whose local file has been located and checked.
#[derive(Debug, Clone)]
struct PreparedItem {
    index: usize,
    kind: MediaKind,
    path: PathBuf,
    name: String,
    mime_type: String,
}

enum ItemResult {
    Done { tier: Tier, body: Value },
    Failed(UploadError),
}

pub struct UploadOrchestrator {
    transport: Arc<dyn MediaTransport>,
    encoder: Arc<dyn MediaEncoder>,
    library: Arc<dyn MediaLibrary>,
}

impl UploadOrchestrator {
    pub fn new(
        transport: Arc<dyn MediaTransport>,
        encoder: Arc<dyn MediaEncoder>,
        library: Arc<dyn MediaLibrary>,
    ) -> Self {
        Self {
            transport,
            encoder,
            library,
        }
    }

    /// Create a post from `request`. Never returns an error; every failure is
    /// folded into the outcome.
    pub async fn submit(&self, request: &PostRequest) -> SubmissionOutcome {
        if let Err(err) = validate_request(request) {
            return SubmissionOutcome::rejected(err, Vec::new());
        }

        let prepared = match self.prepare_all(&request.items).await {
            Ok(prepared) => prepared,
            Err((index, err)) => {
                tracing::warn!(item_index = index, error = %err, "Selected media inaccessible");
                let items = request
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let kind = classify(item);
                        ItemReport {
                            index: i,
                            name: upload_name(item, kind),
                            kind: Some(kind),
                            status: if i == index {
                                failed_status(&err)
                            } else {
                                ItemStatus::NotAttempted
                            },
                        }
                    })
                    .collect();
                return SubmissionOutcome::rejected(err, items);
            }
        };

        let mut outcome = SubmissionOutcome::default();
        let mut state = SubmissionState::new(request.group_id);

        for item in &prepared {
            state = state.begin_item(item.index);
            let target = state.target();

            let (next_state, result) = self
                .upload_item(item, target, &request.content, state, &mut outcome)
                .await;
            state = next_state;

            match result {
                ItemResult::Done { tier, body } => {
                    if state.post_id.is_none() {
                        match post_id_from(&body) {
                            Some(post_id) => {
                                tracing::info!(post_id = post_id, "Post created");
                                state = state.post_created(post_id);
                            }
                            None => {
                                tracing::error!(body = %body, "Post creation response has no post_id");
                                let err = UploadError::MissingPostId;
                                outcome.items.push(report(item, failed_status(&err)));
                                outcome.failure = Some(err);
                                break;
                            }
                        }
                    }
                    state = state.item_done(tier);
                    outcome.items.push(report(item, ItemStatus::Done { tier }));
                }
                ItemResult::Failed(err) => {
                    outcome.items.push(report(item, failed_status(&err)));
                    if outcome.failure.is_none() {
                        outcome.failure = Some(err);
                    }
                    if state.post_id.is_none() {
                        tracing::warn!("First item failed; no post created");
                        break;
                    }
                }
            }
        }

        // Items never reached after an abort.
        for item in prepared.iter().skip(outcome.items.len()) {
            outcome.items.push(report(item, ItemStatus::NotAttempted));
        }

        outcome.degraded = state.degraded;
        outcome.post = state.post_id.map(|post_id| PostCreationResult {
            post_id,
            assigned_quality_tier: state.batch_tier(),
        });
        outcome
    }

    /// Resolve and check every item before anything is sent.
    async fn prepare_all(
        &self,
        items: &[MediaItem],
    ) -> Result<Vec<PreparedItem>, (usize, UploadError)> {
        let mut prepared = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let resolved = resolve_asset_uri(self.library.as_ref(), &item.source).await;
            let path = ensure_readable(&resolved).await.map_err(|e| (index, e))?;
            let kind = classify(item);
            prepared.push(PreparedItem {
                index,
                kind,
                path,
                name: upload_name(item, kind),
                mime_type: upload_mime_type(item, kind),
            });
        }
        Ok(prepared)
    }

    async fn upload_item(
        &self,
        item: &PreparedItem,
        target: UploadTarget,
        content: &str,
        mut state: SubmissionState,
        outcome: &mut SubmissionOutcome,
    ) -> (SubmissionState, ItemResult) {
        let mut last_error = None;

        for &strategy in strategies_for(item.kind) {
            state = state.attempting(strategy.tier());
            tracing::debug!(
                item_index = item.index,
                transport = ?strategy.transport(),
                tier = ?strategy.tier(),
                target = ?target,
                "Attempting upload"
            );

            match self
                .run_strategy(strategy, item, target, content, outcome)
                .await
            {
                AttemptResult::Success { tier, body } => {
                    tracing::info!(item_index = item.index, tier = ?tier, "Item uploaded");
                    return (state, ItemResult::Done { tier, body });
                }
                AttemptResult::Failure(err) => {
                    log_attempt_failure(item, strategy, &err);
                    if !err.is_recoverable() {
                        return (state, ItemResult::Failed(err));
                    }
                    last_error = Some(err);
                }
            }
        }

        let err = last_error.unwrap_or_else(|| {
            UploadError::InvalidSelection(format!("No upload strategy for item {}", item.index))
        });
        (state, ItemResult::Failed(err))
    }

    async fn run_strategy(
        &self,
        strategy: AttemptStrategy,
        item: &PreparedItem,
        target: UploadTarget,
        content: &str,
        outcome: &mut SubmissionOutcome,
    ) -> AttemptResult {
        let result = match strategy {
            AttemptStrategy::Streamed => {
                let file = FileUpload {
                    path: item.path.clone(),
                    name: item.name.clone(),
                    mime_type: item.mime_type.clone(),
                };
                let (path, fields) = match target {
                    UploadTarget::CreatePost { group_id } => (
                        create_post_path(group_id),
                        vec![("content".to_string(), content.to_string())],
                    ),
                    UploadTarget::AttachMedia { post_id } => (attach_media_path(post_id), vec![]),
                };
                self.transport
                    .post_streamed(&path, &file, &fields)
                    .await
                    .map_err(UploadError::from)
            }
            AttemptStrategy::Inline(tier) => {
                let encoded = match self
                    .encoder
                    .encode(&item.path, &item.name, EncodeProfile::for_tier(tier))
                    .await
                {
                    Ok(encoded) => encoded,
                    Err(err) => return AttemptResult::Failure(err.into()),
                };
                // Oversized payloads are never sent.
                if let Err(err) = check_inline_size(encoded.data.len(), item.kind) {
                    return AttemptResult::Failure(err);
                }

                let (path, content, group_id) = match target {
                    UploadTarget::CreatePost { group_id } => (
                        create_post_inline_path(group_id),
                        Some(content.to_string()),
                        Some(group_id),
                    ),
                    UploadTarget::AttachMedia { post_id } => {
                        (attach_media_inline_path(post_id), None, None)
                    }
                };
                let body = InlineBody {
                    content,
                    group_id,
                    files: vec![InlineFile {
                        name: encoded.name,
                        mime_type: encoded.mime_type,
                        data: encoded.data,
                    }],
                };
                self.transport
                    .post_inline(&path, &body)
                    .await
                    .map_err(UploadError::from)
            }
        };

        let failure = result.as_ref().err();
        outcome.attempts.push(AttemptRecord {
            item_index: item.index,
            attempt: strategy.attempt(target),
            failure: failure.map(|e| e.kind()),
        });
        if failure.is_some_and(UploadError::is_unauthorized) {
            outcome.unauthorized = true;
        }

        match result {
            Ok(body) => AttemptResult::Success {
                tier: strategy.tier(),
                body,
            },
            Err(err) => AttemptResult::Failure(err),
        }
    }
}

fn post_id_from(body: &Value) -> Option<i64> {
    match body.get("post_id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn log_attempt_failure(item: &PreparedItem, strategy: AttemptStrategy, err: &UploadError) {
    let index = item.index;
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(item_index = index, strategy = ?strategy, code = code, error = %err, "Upload attempt skipped");
        }
        LogLevel::Warn => {
            tracing::warn!(item_index = index, strategy = ?strategy, code = code, error = %err, "Upload attempt failed");
        }
        LogLevel::Error => {
            tracing::error!(item_index = index, strategy = ?strategy, code = code, error = %err, "Upload attempt failed");
        }
    }
}

fn failed_status(err: &UploadError) -> ItemStatus {
    ItemStatus::Failed {
        kind: err.kind(),
        message: err.client_message(),
    }
}

fn report(item: &PreparedItem, status: ItemStatus) -> ItemReport {
    ItemReport {
        index: item.index,
        name: item.name.clone(),
        kind: Some(item.kind),
        status,
    }
}
