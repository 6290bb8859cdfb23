//! Admin back-office routes.
//!
//! Everything except the login screen requires an allow-listed admin
//! session, enforced per handler by the `RequireAdmin` extractor.

pub mod auth;
pub mod dashboard;
pub mod gallery;
pub mod messages;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Largest accepted upload body (10 MiB).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the admin routes router, nested under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/gallery",
            post(gallery::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/gallery/{id}", delete(gallery::remove))
        .route("/messages", post(messages::create))
        .route("/messages/{id}/toggle", post(messages::toggle))
        .route("/messages/{id}", delete(messages::remove))
}
