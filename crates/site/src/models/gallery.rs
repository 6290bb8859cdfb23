//! Gallery item model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aeestr_core::{GalleryItemId, MediaKind};

/// A single image or video in the public gallery.
///
/// The stored file lives in the media store under
/// `<kind prefix>/<file_name>`; `url` is the public path it is served
/// from. Row and file are created together on upload and removed
/// together on delete, with no transaction across the two steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: GalleryItemId,
    pub title: String,
    pub description: Option<String>,
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub uploaded_at: DateTime<Utc>,
}

/// Filter gallery items by kind, keeping the fetched order.
///
/// `None` means no filter ("all"). The full list is always fetched from
/// the database; filtering happens in memory.
#[must_use]
pub fn filter_by_kind(items: &[GalleryItem], kind: Option<MediaKind>) -> Vec<GalleryItem> {
    match kind {
        None => items.to_vec(),
        Some(kind) => items.iter().filter(|i| i.kind == kind).cloned().collect(),
    }
}

/// Count items of a given kind.
#[must_use]
pub fn count_kind(items: &[GalleryItem], kind: MediaKind) -> usize {
    items.iter().filter(|i| i.kind == kind).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(title: &str, kind: MediaKind) -> GalleryItem {
        GalleryItem {
            id: GalleryItemId::new(),
            title: title.to_string(),
            description: None,
            kind,
            url: format!("/media/{}/{title}.jpg", kind.storage_prefix()),
            thumbnail: None,
            file_name: format!("{title}.jpg"),
            file_size: Some(1024),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let items = vec![
            item("a", MediaKind::Image),
            item("b", MediaKind::Video),
            item("c", MediaKind::Image),
        ];
        assert_eq!(filter_by_kind(&items, None).len(), 3);
    }

    #[test]
    fn test_filter_by_kind_preserves_order() {
        let items = vec![
            item("a", MediaKind::Image),
            item("b", MediaKind::Video),
            item("c", MediaKind::Image),
        ];
        let images = filter_by_kind(&items, Some(MediaKind::Image));
        let titles: Vec<_> = images.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn test_count_kind() {
        let items = vec![
            item("a", MediaKind::Image),
            item("b", MediaKind::Video),
            item("c", MediaKind::Image),
        ];
        assert_eq!(count_kind(&items, MediaKind::Image), 2);
        assert_eq!(count_kind(&items, MediaKind::Video), 1);
    }
}
