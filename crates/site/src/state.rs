//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::broadcast;

use aeestr_core::AnnouncementId;

use crate::config::SiteConfig;
use crate::services::{ContactMailer, MediaStore};

/// Capacity of the announcement change channel. Subscribers that lag
/// simply refetch on the next event, so a small buffer is enough.
const ANNOUNCEMENT_CHANNEL_CAPACITY: usize = 16;

/// A change to the announcement table, fanned out to banner subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementEvent {
    Created(AnnouncementId),
    Updated(AnnouncementId),
    Deleted(AnnouncementId),
}

impl AnnouncementEvent {
    /// SSE event name.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }

    /// The affected announcement.
    #[must_use]
    pub const fn id(self) -> AnnouncementId {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Deleted(id) => id,
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    media: MediaStore,
    mailer: Option<ContactMailer>,
    announcements_tx: broadcast::Sender<AnnouncementEvent>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// `mailer` is `None` when SMTP is not configured; contact emails are
    /// then skipped with a warning.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool, mailer: Option<ContactMailer>) -> Self {
        let media = MediaStore::new(config.media_root.clone());
        let (announcements_tx, _) = broadcast::channel(ANNOUNCEMENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                media,
                mailer,
                announcements_tx,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the media store.
    #[must_use]
    pub fn media(&self) -> &MediaStore {
        &self.inner.media
    }

    /// Get the contact mailer, if SMTP is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&ContactMailer> {
        self.inner.mailer.as_ref()
    }

    /// Subscribe to announcement changes.
    #[must_use]
    pub fn subscribe_announcements(&self) -> broadcast::Receiver<AnnouncementEvent> {
        self.inner.announcements_tx.subscribe()
    }

    /// Publish an announcement change to all banner subscribers.
    ///
    /// A send error only means nobody is listening, which is fine.
    pub fn publish_announcement_event(&self, event: AnnouncementEvent) {
        if self.inner.announcements_tx.send(event).is_err() {
            tracing::debug!(kind = event.kind(), "No announcement subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_and_id() {
        let id = AnnouncementId::new();
        assert_eq!(AnnouncementEvent::Created(id).kind(), "created");
        assert_eq!(AnnouncementEvent::Updated(id).kind(), "updated");
        assert_eq!(AnnouncementEvent::Deleted(id).kind(), "deleted");
        assert_eq!(AnnouncementEvent::Deleted(id).id(), id);
    }
}
