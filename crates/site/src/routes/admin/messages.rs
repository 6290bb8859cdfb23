//! Admin announcement management.
//!
//! Every mutation publishes a change event so open banner streams can
//! refetch immediately.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;

use aeestr_core::AnnouncementId;

use crate::db::AnnouncementRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::{AnnouncementEvent, AppState};

/// New announcement form payload.
#[derive(Debug, Deserialize)]
pub struct NewMessageForm {
    pub title: String,
    pub content: String,
}

/// POST /admin/messages - Create an announcement, active immediately.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<NewMessageForm>,
) -> Result<Redirect, AppError> {
    let title = form.title.trim();
    let content = form.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::BadRequest(
            "title and content are required".to_string(),
        ));
    }

    let announcement = AnnouncementRepository::new(state.pool())
        .create(title, content, &admin.email)
        .await?;

    state.publish_announcement_event(AnnouncementEvent::Created(announcement.id));
    tracing::info!(id = %announcement.id, by = %admin.email, "Announcement created");

    Ok(Redirect::to("/admin"))
}

/// POST /admin/messages/{id}/toggle - Flip the active flag.
pub async fn toggle(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
) -> Result<Redirect, AppError> {
    let announcement = AnnouncementRepository::new(state.pool())
        .toggle_active(id)
        .await?;

    state.publish_announcement_event(AnnouncementEvent::Updated(id));
    tracing::info!(
        id = %id,
        is_active = announcement.is_active,
        by = %admin.email,
        "Announcement toggled"
    );

    Ok(Redirect::to("/admin"))
}

/// DELETE /admin/messages/{id} - Remove an announcement.
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
) -> Result<StatusCode, AppError> {
    AnnouncementRepository::new(state.pool()).delete(id).await?;

    state.publish_announcement_event(AnnouncementEvent::Deleted(id));
    tracing::info!(id = %id, by = %admin.email, "Announcement deleted");

    Ok(StatusCode::NO_CONTENT)
}
