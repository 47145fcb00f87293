//! Selection limits and request validation applied before a submission starts.

use groupo_core::{ClientConfig, MediaItem, MediaKind, UploadError};
use groupo_processing::classify;

/// Post to create: caption, group and ordered media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub group_id: i64,
    pub content: String,
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub max_items: usize,
    pub max_video_seconds: u64,
}

impl From<&ClientConfig> for SelectionLimits {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_items: config.max_media_per_post,
            max_video_seconds: config.max_video_seconds,
        }
    }
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// Items kept after applying limits, plus a notice when some were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub items: Vec<MediaItem>,
    pub notice: Option<String>,
}

/// Truncate to `max_items` and reject videos longer than `max_video_seconds`.
pub fn apply_selection_limits(
    mut items: Vec<MediaItem>,
    limits: SelectionLimits,
) -> Result<Selection, UploadError> {
    let notice = (items.len() > limits.max_items).then(|| {
        tracing::warn!(
            selected = items.len(),
            max = limits.max_items,
            "Selection truncated"
        );
        format!(
            "You can attach up to {} items per post.",
            limits.max_items
        )
    });
    items.truncate(limits.max_items);

    let too_long = items.iter().any(|item| {
        classify(item) == MediaKind::Video
            && item
                .duration_ms
                .is_some_and(|ms| ms > limits.max_video_seconds * 1000)
    });
    if too_long {
        return Err(UploadError::InvalidSelection(format!(
            "Videos must be {}s or less. Please trim and try again.",
            limits.max_video_seconds
        )));
    }

    Ok(Selection { items, notice })
}

pub fn validate_request(request: &PostRequest) -> Result<(), UploadError> {
    if request.group_id <= 0 {
        return Err(UploadError::InvalidSelection(
            "Select a group to post in.".to_string(),
        ));
    }
    if request.items.is_empty() {
        return Err(UploadError::InvalidSelection(
            "Select at least one photo or video before posting.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::from_uri(format!("/tmp/p{}.jpg", i)))
            .collect()
    }

    #[test]
    fn test_truncates_with_notice() {
        let selection = apply_selection_limits(photos(23), SelectionLimits::default()).unwrap();
        assert_eq!(selection.items.len(), 20);
        assert_eq!(
            selection.notice.as_deref(),
            Some("You can attach up to 20 items per post.")
        );
        assert_eq!(selection.items[19].display_name, "p19.jpg");
    }

    #[test]
    fn test_within_limit_has_no_notice() {
        let selection = apply_selection_limits(photos(3), SelectionLimits::default()).unwrap();
        assert_eq!(selection.items.len(), 3);
        assert!(selection.notice.is_none());
    }

    #[test]
    fn test_rejects_long_video() {
        let items = vec![
            MediaItem::from_uri("/tmp/a.jpg"),
            MediaItem::from_uri("/tmp/clip.mov").with_duration_ms(20_001),
        ];
        let err = apply_selection_limits(items, SelectionLimits::default()).unwrap_err();
        assert_eq!(
            err,
            UploadError::InvalidSelection(
                "Videos must be 20s or less. Please trim and try again.".to_string()
            )
        );

        let ok = vec![MediaItem::from_uri("/tmp/clip.mov").with_duration_ms(20_000)];
        assert!(apply_selection_limits(ok, SelectionLimits::default()).is_ok());
    }

    #[test]
    fn test_validate_request() {
        let mut request = PostRequest {
            group_id: 0,
            content: "hi".to_string(),
            items: photos(1),
        };
        assert!(validate_request(&request).is_err());

        request.group_id = 2;
        assert!(validate_request(&request).is_ok());

        request.items.clear();
        let err = validate_request(&request).unwrap_err();
        assert_eq!(
            err,
            UploadError::InvalidSelection(
                "Select at least one photo or video before posting.".to_string()
            )
        );
    }
}
