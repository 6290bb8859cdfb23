//! Announcement repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aeestr_core::{AnnouncementId, Email};

use super::RepositoryError;
use crate::models::Announcement;

/// Internal row type for announcement queries.
#[derive(Debug, sqlx::FromRow)]
struct AnnouncementRow {
    id: Uuid,
    title: String,
    content: String,
    is_active: bool,
    author_email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AnnouncementRow> for Announcement {
    type Error = RepositoryError;

    fn try_from(row: AnnouncementRow) -> Result<Self, Self::Error> {
        let author_email = Email::parse(&row.author_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid author email in database: {e}"))
        })?;

        Ok(Self {
            id: AnnouncementId::from_uuid(row.id),
            title: row.title,
            content: row.content,
            is_active: row.is_active,
            author_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, title, content, is_active, author_email, created_at, updated_at";

/// Repository for announcement database operations.
pub struct AnnouncementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnnouncementRepository<'a> {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all announcements, newest first. Admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM admin_message ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List active announcements, newest first.
    ///
    /// This is the only query the public banner uses, so inactive rows can
    /// never reach a visitor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM admin_message
             WHERE is_active = TRUE
             ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new announcement, active by default.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author_email: &Email,
    ) -> Result<Announcement, RepositoryError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "INSERT INTO admin_message (title, content, author_email)
             VALUES ($1, $2, $3)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(author_email.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Flip an announcement's active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the announcement doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle_active(&self, id: AnnouncementId) -> Result<Announcement, RepositoryError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "UPDATE admin_message
             SET is_active = NOT is_active, updated_at = now()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an announcement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the announcement doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AnnouncementId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin_message WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
