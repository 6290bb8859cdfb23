//! Gallery repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aeestr_core::{GalleryItemId, MediaKind};

use super::RepositoryError;
use crate::models::GalleryItem;

/// Internal row type for gallery queries.
///
/// `kind` stays a plain string here; `TryFrom` resolves it (including the
/// legacy `photo` tag) into [`MediaKind`].
#[derive(Debug, sqlx::FromRow)]
struct GalleryRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    kind: String,
    url: String,
    thumbnail: Option<String>,
    file_name: String,
    file_size: Option<i64>,
    uploaded_at: DateTime<Utc>,
}

impl TryFrom<GalleryRow> for GalleryItem {
    type Error = RepositoryError;

    fn try_from(row: GalleryRow) -> Result<Self, Self::Error> {
        let kind = MediaKind::parse(&row.kind).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid media kind in database: {e}"))
        })?;

        Ok(Self {
            id: GalleryItemId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            kind,
            url: row.url,
            thumbnail: row.thumbnail,
            file_name: row.file_name,
            file_size: row.file_size,
            uploaded_at: row.uploaded_at,
        })
    }
}

/// Metadata for a freshly uploaded gallery item.
#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub title: String,
    pub description: Option<String>,
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub file_name: String,
    pub file_size: Option<i64>,
}

const SELECT_COLUMNS: &str =
    "id, title, description, kind, url, thumbnail, file_name, file_size, uploaded_at";

/// Repository for gallery database operations.
pub struct GalleryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GalleryRepository<'a> {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all gallery items, newest upload first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored kind tag is invalid.
    pub async fn list_all(&self) -> Result<Vec<GalleryItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, GalleryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM gallery_item ORDER BY uploaded_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a gallery item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored kind tag is invalid.
    pub async fn get_by_id(
        &self,
        id: GalleryItemId,
    ) -> Result<Option<GalleryItem>, RepositoryError> {
        let row = sqlx::query_as::<_, GalleryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM gallery_item WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert the metadata row for an uploaded file.
    ///
    /// The file itself must already be in the media store; `url` points at
    /// its public path. The kind is always written with its canonical tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, item: &NewGalleryItem) -> Result<GalleryItem, RepositoryError> {
        let row = sqlx::query_as::<_, GalleryRow>(&format!(
            "INSERT INTO gallery_item (title, description, kind, url, thumbnail, file_name, file_size)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.kind.as_str())
        .bind(&item.url)
        .bind(&item.thumbnail)
        .bind(&item.file_name)
        .bind(item.file_size)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Delete a gallery item's metadata row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: GalleryItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM gallery_item WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
