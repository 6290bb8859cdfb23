//! Admin user model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aeestr_core::{AdminUserId, Email};

/// An allow-listed administrator.
///
/// Rows in `admin_user` are the allow-list: only these emails can hold an
/// admin session. The table is managed by the CLI, never mutated by the
/// web application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
