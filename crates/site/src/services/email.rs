//! Email service for contact form notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Each
//! contact submission produces two emails: a notification to the
//! association inbox and a confirmation back to the sender.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use aeestr_core::Email;

use crate::config::EmailConfig;
use crate::models::ContactSubmission;

/// HTML template for the notification sent to the association.
#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Plain text template for the notification sent to the association.
#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// HTML template for the confirmation sent to the visitor.
#[derive(Template)]
#[template(path = "email/contact_confirmation.html")]
struct ContactConfirmationHtml<'a> {
    name: &'a str,
    message: &'a str,
}

/// Plain text template for the confirmation sent to the visitor.
#[derive(Template)]
#[template(path = "email/contact_confirmation.txt")]
struct ContactConfirmationText<'a> {
    name: &'a str,
    message: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Mailer for contact form emails.
#[derive(Clone)]
pub struct ContactMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    inbox: Email,
}

impl ContactMailer {
    /// Create a new mailer from configuration.
    ///
    /// `inbox` is the association address that receives notifications.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig, inbox: Email) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            inbox,
        })
    }

    /// Send both contact emails: notification to the association, then
    /// confirmation to the sender.
    ///
    /// # Errors
    ///
    /// Returns error if either message fails to render or send.
    pub async fn send_contact_emails(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), EmailError> {
        self.send_notification(submission).await?;
        self.send_confirmation(submission).await
    }

    /// Notify the association inbox about a new submission.
    async fn send_notification(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let html = ContactNotificationHtml {
            name: &submission.name,
            email: submission.email.as_str(),
            message: &submission.message,
        }
        .render()?;
        let text = ContactNotificationText {
            name: &submission.name,
            email: submission.email.as_str(),
            message: &submission.message,
        }
        .render()?;

        let subject = format!("Nouveau message de contact - {}", submission.name);
        self.send_multipart_email(self.inbox.as_str(), &subject, &text, &html)
            .await
    }

    /// Confirm receipt to the visitor.
    async fn send_confirmation(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let html = ContactConfirmationHtml {
            name: &submission.name,
            message: &submission.message,
        }
        .render()?;
        let text = ContactConfirmationText {
            name: &submission.name,
            message: &submission.message,
        }
        .render()?;

        self.send_multipart_email(
            submission.email.as_str(),
            "Confirmation de réception - AEESTR",
            &text,
            &html,
        )
        .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_templates_render() {
        let html = ContactNotificationHtml {
            name: "Moussa",
            email: "moussa@example.com",
            message: "Bonjour,\nje voudrais des informations.",
        }
        .render()
        .unwrap();
        assert!(html.contains("Moussa"));
        assert!(html.contains("moussa@example.com"));

        let text = ContactNotificationText {
            name: "Moussa",
            email: "moussa@example.com",
            message: "Bonjour",
        }
        .render()
        .unwrap();
        assert!(text.contains("Moussa"));
    }

    #[test]
    fn test_confirmation_templates_render() {
        let html = ContactConfirmationHtml {
            name: "Aisha",
            message: "Quand a lieu la prochaine rencontre ?",
        }
        .render()
        .unwrap();
        assert!(html.contains("Aisha"));

        let text = ContactConfirmationText {
            name: "Aisha",
            message: "Quand a lieu la prochaine rencontre ?",
        }
        .render()
        .unwrap();
        assert!(text.contains("prochaine rencontre"));
    }

    #[test]
    fn test_html_templates_escape_markup() {
        let html = ContactNotificationHtml {
            name: "<script>alert(1)</script>",
            email: "x@example.com",
            message: "hello",
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
    }
}
