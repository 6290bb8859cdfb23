//! Contact submission repository.
//!
//! Write-only from the application's perspective: submissions are the
//! durable record of the contact form and are never read back.

use sqlx::PgPool;
use uuid::Uuid;

use aeestr_core::ContactId;

use super::RepositoryError;
use crate::models::ContactSubmission;

/// Repository for contact submission database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a contact submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactId, RepositoryError> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO contact_submission (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&submission.name)
        .bind(submission.email.as_str())
        .bind(&submission.message)
        .fetch_one(self.pool)
        .await?;

        Ok(ContactId::from_uuid(id))
    }
}
