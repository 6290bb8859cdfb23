//! Authorization guard for the admin back-office.
//!
//! The original screens each re-implemented the session + allow-list
//! check; here it is one extractor evaluated per request, so handlers
//! only run for a session whose email is still allow-listed.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AdminUser, CurrentAdmin, session_keys};
use crate::state::AppState;

use crate::db::{AdminUserRepository, RepositoryError};

/// Extractor that requires an allow-listed admin session.
///
/// Two checks run in order: the session must hold an identity, and that
/// identity's email must still exist in the `admin_user` table. A session
/// that fails the second check is destroyed before the redirect, which is
/// what revokes access when an admin is removed from the allow-list. If
/// the lookup itself fails the session is kept and the request errors.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when admin authorization fails.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// The allow-list check itself failed; the session is kept.
    Internal,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// What the allow-list recheck decided for a session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllowListCheck {
    /// The email still has an `admin_user` row.
    Allowed,
    /// The row is gone; the session must be destroyed.
    Revoked,
    /// The lookup failed. Not a revocation: the session is kept and the
    /// request fails with an internal error instead.
    Unavailable,
}

fn check_allow_list(lookup: &Result<Option<AdminUser>, RepositoryError>) -> AllowListCheck {
    match lookup {
        Ok(Some(_)) => AllowListCheck::Allowed,
        Ok(None) => AllowListCheck::Revoked,
        Err(_) => AllowListCheck::Unavailable,
    }
}

/// Map a missing session to the right rejection for the request shape.
fn not_logged_in(parts: &Parts) -> AdminAuthRejection {
    if parts.uri.path().starts_with("/api/") {
        AdminAuthRejection::Unauthorized
    } else {
        AdminAuthRejection::RedirectToLogin
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?
            .clone();

        // Get the current admin identity from the session
        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| not_logged_in(parts))?;

        // Re-check the allow-list; a removed admin's session is revoked here
        let lookup = AdminUserRepository::new(state.pool())
            .get_by_email(&admin.email)
            .await;

        match check_allow_list(&lookup) {
            AllowListCheck::Allowed => Ok(Self(admin)),
            AllowListCheck::Revoked => {
                tracing::warn!(
                    email = %admin.email,
                    "Session email no longer allow-listed, signing out"
                );
                if let Err(e) = session.flush().await {
                    tracing::warn!(error = %e, "Failed to destroy revoked session");
                }
                Err(AdminAuthRejection::RedirectToLogin)
            }
            AllowListCheck::Unavailable => {
                if let Err(e) = &lookup {
                    tracing::error!(error = %e, "Allow-list check failed");
                }
                Err(AdminAuthRejection::Internal)
            }
        }
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the session on logout.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use aeestr_core::{AdminUserId, Email};

    fn admin_user() -> AdminUser {
        AdminUser {
            id: AdminUserId::new(),
            email: Email::parse("admin@aeestr.org").expect("valid email"),
            name: "Admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_allow_listed_email_passes() {
        assert_eq!(
            check_allow_list(&Ok(Some(admin_user()))),
            AllowListCheck::Allowed
        );
    }

    #[test]
    fn test_missing_row_revokes() {
        // An email with no admin_user row never reaches a handler body
        assert_eq!(check_allow_list(&Ok(None)), AllowListCheck::Revoked);
    }

    #[test]
    fn test_lookup_failure_is_not_revocation() {
        // A transient database failure must not destroy the session
        let lookup = Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(check_allow_list(&lookup), AllowListCheck::Unavailable);
    }

    #[test]
    fn test_rejection_responses() {
        assert_eq!(
            AdminAuthRejection::RedirectToLogin.into_response().status(),
            StatusCode::SEE_OTHER
        );
        assert_eq!(
            AdminAuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AdminAuthRejection::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
