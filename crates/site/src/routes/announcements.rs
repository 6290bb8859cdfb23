//! Announcement routes: public JSON listing, the rotating banner
//! fragment, and the change stream the banner listens to.

use std::convert::Infallible;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;

use aeestr_core::AnnouncementId;

use crate::db::AnnouncementRepository;
use crate::error::AppError;
use crate::models::Announcement;
use crate::models::announcement::{next_index, previous_index, wrap_index};
use crate::state::AppState;

/// Public JSON shape of an active announcement.
///
/// The author's email stays server-side.
#[derive(Debug, Serialize)]
pub struct PublicAnnouncement {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Announcement> for PublicAnnouncement {
    fn from(a: Announcement) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            created_at: a.created_at,
        }
    }
}

/// GET /api/announcements - Active announcements, newest first.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicAnnouncement>>, AppError> {
    let announcements = AnnouncementRepository::new(state.pool())
        .list_active()
        .await?;

    Ok(Json(
        announcements
            .into_iter()
            .map(PublicAnnouncement::from)
            .collect(),
    ))
}

/// One announcement positioned in the banner rotation.
pub struct BannerView {
    pub title: String,
    pub content: String,
    pub index: usize,
    pub total: usize,
    pub next: usize,
    pub previous: usize,
}

impl BannerView {
    /// View of the announcement at `index`, with the neighbouring indices
    /// precomputed for the prev/next controls. `index` is wrapped first,
    /// so any value from a query string is safe.
    ///
    /// # Panics
    ///
    /// Panics if `announcements` is empty; callers check first.
    #[must_use]
    pub fn at_index(announcements: &[Announcement], index: usize) -> Self {
        let total = announcements.len();
        let index = wrap_index(total, index);
        let announcement = &announcements[index];

        Self {
            title: announcement.title.clone(),
            content: announcement.content.clone(),
            index,
            total,
            next: next_index(total, index),
            previous: previous_index(total, index),
        }
    }
}

/// Banner fragment template. Renders empty when nothing is active.
#[derive(Template, WebTemplate)]
#[template(path = "partials/banner.html")]
pub struct BannerTemplate {
    pub banner: Option<BannerView>,
}

/// Query parameters for the banner fragment.
#[derive(Debug, Deserialize)]
pub struct BannerQuery {
    /// Rotation position; out-of-range values wrap around.
    #[serde(default)]
    pub index: usize,
}

/// GET /announcements/banner - Banner fragment at a rotation position.
///
/// The prev/next controls request this with the precomputed neighbour
/// index, which is how the rotation cycles.
pub async fn banner(
    State(state): State<AppState>,
    Query(query): Query<BannerQuery>,
) -> Result<BannerTemplate, AppError> {
    let announcements = AnnouncementRepository::new(state.pool())
        .list_active()
        .await?;

    let banner = if announcements.is_empty() {
        None
    } else {
        Some(BannerView::at_index(&announcements, query.index))
    };

    Ok(BannerTemplate { banner })
}

/// GET /api/announcements/stream - Announcement changes as SSE.
///
/// Clients refetch the banner on any event; the payload is just the
/// affected id. A lagged subscriber skips ahead instead of erroring,
/// since the next event triggers the same refetch.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.subscribe_announcements();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    yield Ok(Event::default()
                        .event(event.kind())
                        .data(event.id().to_string()));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Announcement subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeestr_core::Email;

    fn announcement(title: &str) -> Announcement {
        Announcement {
            id: AnnouncementId::new(),
            title: title.to_string(),
            content: format!("{title} content"),
            is_active: true,
            author_email: Email::parse("admin@aeestr.org").expect("valid email"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_banner_view_wraps_index() {
        let list = vec![announcement("a"), announcement("b"), announcement("c")];
        let view = BannerView::at_index(&list, 5);
        assert_eq!(view.index, 2);
        assert_eq!(view.title, "c");
        assert_eq!(view.next, 0);
        assert_eq!(view.previous, 1);
    }

    #[test]
    fn test_banner_view_single_item() {
        let list = vec![announcement("only")];
        let view = BannerView::at_index(&list, 0);
        assert_eq!(view.next, 0);
        assert_eq!(view.previous, 0);
        assert_eq!(view.total, 1);
    }

    #[test]
    fn test_public_announcement_hides_author() {
        let json = serde_json::to_value(PublicAnnouncement::from(announcement("hello")))
            .expect("serializable");
        assert!(json.get("author_email").is_none());
        assert_eq!(json["title"], "hello");
    }
}
