//! Admin gallery management: upload and delete.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Redirect,
};

use aeestr_core::{GalleryItemId, MediaKind};

use crate::db::{GalleryRepository, RepositoryError, gallery::NewGalleryItem};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Parsed multipart upload form.
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    kind: Option<MediaKind>,
    file_name: Option<String>,
    bytes: Option<Vec<u8>>,
}

/// Read the multipart fields we know; anything else is ignored.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("title") => {
                form.title = Some(read_text(field).await?);
            }
            Some("description") => {
                let text = read_text(field).await?;
                if !text.trim().is_empty() {
                    form.description = Some(text);
                }
            }
            Some("kind") => {
                let text = read_text(field).await?;
                let kind = MediaKind::parse(&text)
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.kind = Some(kind);
            }
            Some("file") => {
                form.file_name = field.file_name().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read file: {e}")))?;
                form.bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid field value: {e}")))
}

/// POST /admin/gallery - Store an uploaded file and its metadata row.
///
/// The file is written to the media store first; if the insert then
/// fails, the orphaned file is removed on a best-effort basis.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = read_upload_form(multipart).await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
    let kind = form
        .kind
        .ok_or_else(|| AppError::BadRequest("kind is required".to_string()))?;
    let bytes = form
        .bytes
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::BadRequest("file is required".to_string()))?;
    let original_name = form.file_name.unwrap_or_default();

    let stored = state.media().store(kind, &original_name, &bytes).await?;

    let new_item = NewGalleryItem {
        title,
        description: form.description,
        kind,
        url: stored.public_url.clone(),
        thumbnail: None,
        file_name: stored.file_name,
        file_size: i64::try_from(bytes.len()).ok(),
    };

    let item = match GalleryRepository::new(state.pool()).insert(&new_item).await {
        Ok(item) => item,
        Err(e) => {
            // Don't leave the stored file orphaned
            if let Err(cleanup) = state.media().delete_by_url(kind, &stored.public_url).await {
                tracing::warn!(error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        id = %item.id,
        kind = %kind,
        by = %admin.email,
        "Gallery item uploaded"
    );

    Ok(Redirect::to("/admin"))
}

/// DELETE /admin/gallery/{id} - Remove a gallery item.
///
/// The metadata row goes first, then the stored file. A file that is
/// already missing only gets a warning; the row is the source of truth.
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<GalleryItemId>,
) -> Result<StatusCode, AppError> {
    let repo = GalleryRepository::new(state.pool());

    let item = repo
        .get_by_id(id)
        .await?
        .ok_or(AppError::Database(RepositoryError::NotFound))?;

    repo.delete(id).await?;

    if let Err(e) = state.media().delete_by_url(item.kind, &item.url).await {
        tracing::warn!(id = %id, error = %e, "Failed to remove stored media file");
    }

    tracing::info!(id = %id, by = %admin.email, "Gallery item deleted");
    Ok(StatusCode::NO_CONTENT)
}
