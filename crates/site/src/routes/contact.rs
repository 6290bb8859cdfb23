//! Contact form route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use aeestr_core::Email;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::models::ContactSubmission;
use crate::state::AppState;

/// Longest accepted message body.
const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Incoming contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for the contact form endpoint.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Error body for the standalone email endpoint.
///
/// Callers of this endpoint check the `error` key, so failures keep the
/// shape `{"error": "..."}` alongside the non-2xx status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Validate the form: every field required, email well-formed.
fn validate(form: &ContactForm) -> Result<ContactSubmission, AppError> {
    let name = form.name.trim();
    let message = form.message.trim();

    if name.is_empty() || message.is_empty() || form.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Tous les champs sont requis".to_string(),
        ));
    }
    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest("Message trop long".to_string()));
    }

    let email = Email::parse(&form.email)
        .map_err(|_| AppError::BadRequest("Adresse email invalide".to_string()))?;

    Ok(ContactSubmission {
        name: name.to_string(),
        email,
        message: message.to_string(),
    })
}

/// Send both contact emails if a mailer is configured, logging failures.
///
/// Returns whether delivery succeeded. Callers decide what that means;
/// the stored row is the durable record either way.
async fn try_send_emails(state: &AppState, submission: &ContactSubmission) -> bool {
    let Some(mailer) = state.mailer() else {
        tracing::warn!("SMTP not configured, skipping contact emails");
        return false;
    };

    match mailer.send_contact_emails(submission).await {
        Ok(()) => true,
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!(error = %e, "Failed to send contact emails");
            false
        }
    }
}

/// POST /api/contact - Persist a submission, then send emails.
///
/// The submission is stored first; email delivery is best-effort and a
/// delivery failure still reports success to the visitor.
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>, AppError> {
    let submission = validate(&form)?;

    let id = ContactRepository::new(state.pool())
        .create(&submission)
        .await?;
    tracing::info!(contact_id = %id, "Contact submission stored");

    let email_sent = try_send_emails(&state, &submission).await;

    Ok(Json(stored_response(email_sent)))
}

/// Response once the submission row is stored.
///
/// The row is the durable record; email delivery does not change the
/// outcome reported to the visitor.
fn stored_response(email_sent: bool) -> ContactResponse {
    if !email_sent {
        tracing::warn!("Submission stored, reporting success without email delivery");
    }
    ContactResponse {
        success: true,
        message: "Votre message a bien été envoyé".to_string(),
    }
}

/// POST /api/send-contact-email - Email-only delivery endpoint.
///
/// Nothing is persisted here, so unlike [`submit`] a delivery failure is
/// reported to the caller.
pub async fn send_contact_email(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>, (StatusCode, Json<ErrorResponse>)> {
    let submission = validate(&form).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    if try_send_emails(&state, &submission).await {
        Ok(Json(ContactResponse {
            success: true,
            message: "Emails envoyés".to_string(),
        }))
    } else {
        Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "L'envoi des emails a échoué".to_string(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let submission =
            validate(&form("Moussa", "Moussa@Example.com", "Bonjour")).expect("valid form");
        assert_eq!(submission.name, "Moussa");
        // Email is normalized on parse
        assert_eq!(submission.email.as_str(), "moussa@example.com");
    }

    #[test]
    fn test_validate_requires_every_field() {
        assert!(validate(&form("", "a@b.c", "hi")).is_err());
        assert!(validate(&form("Moussa", "", "hi")).is_err());
        assert!(validate(&form("Moussa", "a@b.c", "   ")).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        assert!(validate(&form("Moussa", "not-an-email", "hi")).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_message() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(validate(&form("Moussa", "a@b.c", &long)).is_err());
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let submission = validate(&form("  Aisha  ", "a@b.c", "  hello  ")).expect("valid form");
        assert_eq!(submission.name, "Aisha");
        assert_eq!(submission.message, "hello");
    }

    #[test]
    fn test_error_body_exposes_error_key() {
        // The standalone email endpoint's failure contract is {"error": ...}
        let json = serde_json::to_value(ErrorResponse {
            error: "relay unreachable".to_string(),
        })
        .expect("serializable");
        assert!(json.get("error").is_some());
        assert!(json.get("success").is_none());
        assert_eq!(json["error"], "relay unreachable");
    }

    #[test]
    fn test_stored_submission_reports_success_without_email() {
        // Persistence, not notification, is the success criterion
        assert!(stored_response(false).success);
        assert!(stored_response(true).success);
    }
}
