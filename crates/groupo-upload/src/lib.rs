//! Media upload pipeline.
//!
//! Turns a caption, a group and an ordered list of selected media into a post,
//! falling back from streamed uploads to inline re-encoded uploads at
//! decreasing quality.

pub mod orchestrator;
pub mod outcome;
pub mod resolver;
pub mod selection;
pub mod state;
pub mod strategy;

pub use orchestrator::UploadOrchestrator;
pub use outcome::{AttemptRecord, ItemReport, ItemStatus, OutcomeReport, SubmissionOutcome};
pub use resolver::{
    ensure_readable, resolve_asset_uri, AssetInfo, IndexedLibrary, MediaLibrary, NoLibrary,
};
pub use selection::{apply_selection_limits, PostRequest, Selection, SelectionLimits};
pub use state::SubmissionState;
pub use strategy::{strategies_for, AttemptStrategy};
