//! Contact form submission.

use serde::{Deserialize, Serialize};

use aeestr_core::Email;

/// A validated contact form submission.
///
/// Persisted once and never read back by the application; the stored row
/// is the durable record, the notification emails are best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}
