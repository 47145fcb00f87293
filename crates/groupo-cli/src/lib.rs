use std::sync::Arc;

use anyhow::Context;
use groupo_core::{ClientConfig, MediaItem};
use groupo_upload::{IndexedLibrary, MediaLibrary, NoLibrary, OutcomeReport};
use serde::Serialize;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Turn a command-line media argument (path, `file://`, `ph://` or
/// `assets-library://` URI) into a selected item.
pub fn media_item_from_arg(arg: &str, mime_type: Option<&str>) -> MediaItem {
    let item = MediaItem::from_uri(arg.trim());
    match mime_type {
        Some(mime) => item.with_mime_type(mime),
        None => item,
    }
}

/// Media library used to resolve addressable URIs. Without an index every
/// addressable URI stays unresolved.
pub async fn load_library(config: &ClientConfig) -> anyhow::Result<Arc<dyn MediaLibrary>> {
    let Some(path) = &config.media_library_index else {
        return Ok(Arc::new(NoLibrary));
    };
    let library = IndexedLibrary::load(path)
        .await
        .context("Failed to load media library")?;
    tracing::info!(
        path = %path.display(),
        assets = library.len(),
        "Media library index loaded"
    );
    Ok(Arc::new(library))
}

/// JSON printed by `groupo post`.
#[derive(Debug, Serialize)]
pub struct PostOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(flatten)]
    pub report: OutcomeReport<'a>,
}
