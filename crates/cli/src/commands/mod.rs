//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use aeestr_site::db::RepositoryError;
use aeestr_site::services::AuthError;

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Authentication helper error (hashing, weak password).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Failed to read input from the terminal.
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

/// Connect to the site database using the standard environment variables.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("AEESTR_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("AEESTR_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = aeestr_site::db::create_pool(&SecretString::from(database_url)).await?;

    Ok(pool)
}
