//! Admin dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use aeestr_core::MediaKind;

use crate::db::{AnnouncementRepository, GalleryRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::gallery::count_kind;
use crate::models::{Announcement, GalleryItem};
use crate::state::AppState;

/// Media counts shown in the stats cards.
pub struct MediaStats {
    pub total: usize,
    pub images: usize,
    pub videos: usize,
}

/// A gallery item prepared for the management table.
pub struct GalleryRowView {
    pub id: String,
    pub title: String,
    pub kind: &'static str,
    pub url: String,
    pub file_size: String,
    pub uploaded_on: String,
}

impl From<GalleryItem> for GalleryRowView {
    fn from(item: GalleryItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title,
            kind: item.kind.as_str(),
            url: item.url,
            file_size: item.file_size.map_or_else(String::new, format_size),
            uploaded_on: item.uploaded_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// An announcement prepared for the management table.
pub struct AnnouncementRowView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub author_email: String,
    pub created_on: String,
}

impl From<Announcement> for AnnouncementRowView {
    fn from(a: Announcement) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title,
            content: a.content,
            is_active: a.is_active,
            author_email: a.author_email.to_string(),
            created_on: a.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub stats: MediaStats,
    pub gallery: Vec<GalleryRowView>,
    pub announcements: Vec<AnnouncementRowView>,
}

/// GET /admin - Render the dashboard: stats, gallery and announcements.
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let items = GalleryRepository::new(state.pool()).list_all().await?;
    let announcements = AnnouncementRepository::new(state.pool()).list_all().await?;

    let stats = MediaStats {
        total: items.len(),
        images: count_kind(&items, MediaKind::Image),
        videos: count_kind(&items, MediaKind::Video),
    };

    Ok(DashboardTemplate {
        admin_name: admin.name,
        stats,
        gallery: items.into_iter().map(GalleryRowView::from).collect(),
        announcements: announcements
            .into_iter()
            .map(AnnouncementRowView::from)
            .collect(),
    })
}

/// Human-readable file size.
fn format_size(bytes: i64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    #[allow(clippy::cast_precision_loss)]
    let bytes = bytes as f64;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
