//! Admin allow-list management commands.
//!
//! # Usage
//!
//! ```bash
//! aeestr-cli admin create -e admin@aeestr.org -n "Admin Name"
//! aeestr-cli admin list
//! aeestr-cli admin set-password -e admin@aeestr.org
//! aeestr-cli admin remove -e admin@aeestr.org
//! ```

use std::io::{BufRead, Write};

use aeestr_core::Email;
use aeestr_site::db::AdminUserRepository;
use aeestr_site::services::auth::{hash_password, validate_password};

use super::CliError;

/// Add an admin to the allow-list.
///
/// # Errors
///
/// Returns `CliError` on a malformed email, weak password, duplicate
/// email, or database failure.
pub async fn create(email: &str, name: &str, password: Option<String>) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let password = resolve_password(password)?;
    validate_password(&password)?;
    let password_hash = hash_password(&password)?;

    let pool = super::connect().await?;
    let user = AdminUserRepository::new(&pool)
        .create(&email, name, &password_hash)
        .await?;

    tracing::info!("Admin created: {} <{}>", user.name, user.email);
    Ok(())
}

/// List allow-listed admins.
///
/// # Errors
///
/// Returns `CliError` on database failure.
pub async fn list() -> Result<(), CliError> {
    let pool = super::connect().await?;
    let admins = AdminUserRepository::new(&pool).list_all().await?;

    if admins.is_empty() {
        tracing::info!("No admins in the allow-list");
        return Ok(());
    }

    for admin in admins {
        tracing::info!(
            "{} <{}> (since {})",
            admin.name,
            admin.email,
            admin.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Remove an admin from the allow-list.
///
/// Any live session for this email is revoked on its next request.
///
/// # Errors
///
/// Returns `CliError` if the email is malformed or unknown.
pub async fn remove(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let pool = super::connect().await?;
    AdminUserRepository::new(&pool)
        .delete_by_email(&email)
        .await?;

    tracing::info!("Admin removed: {email}");
    Ok(())
}

/// Replace an admin's password.
///
/// # Errors
///
/// Returns `CliError` on a malformed email, weak password, unknown
/// admin, or database failure.
pub async fn set_password(email: &str, password: Option<String>) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let password = resolve_password(password)?;
    validate_password(&password)?;
    let password_hash = hash_password(&password)?;

    let pool = super::connect().await?;
    AdminUserRepository::new(&pool)
        .update_password_hash(&email, &password_hash)
        .await?;

    tracing::info!("Password updated for {email}");
    Ok(())
}

/// Use the provided password or prompt for one on stdin.
fn resolve_password(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }

    #[allow(clippy::print_stderr)]
    {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
