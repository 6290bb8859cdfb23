//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, about, services, gallery, contact)
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Announcements
//! GET  /api/announcements          - Active announcements (JSON)
//! GET  /api/announcements/stream   - Change notifications (SSE)
//! GET  /announcements/banner       - Banner fragment (?index=N, circular)
//!
//! # Contact
//! POST /api/contact                - Persist submission, then send emails
//! POST /api/send-contact-email     - Email-only endpoint (CORS enabled)
//!
//! # Admin
//! GET  /admin                      - Dashboard (guarded)
//! GET  /admin/login                - Login page
//! POST /admin/login                - Login action
//! POST /admin/logout               - Logout action
//! POST /admin/gallery              - Upload media (multipart, guarded)
//! DELETE /admin/gallery/{id}       - Delete media row + stored file (guarded)
//! POST /admin/messages             - Create announcement (guarded)
//! POST /admin/messages/{id}/toggle - Toggle announcement active flag (guarded)
//! DELETE /admin/messages/{id}      - Delete announcement (guarded)
//! ```

pub mod admin;
pub mod announcements;
pub mod contact;
pub mod home;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Create the announcement routes router.
pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/announcements", get(announcements::list_active))
        .route("/api/announcements/stream", get(announcements::stream))
        .route("/announcements/banner", get(announcements::banner))
}

/// Create the contact routes router.
///
/// `/api/send-contact-email` keeps the original function's contract:
/// callable cross-origin, preflight included.
pub fn contact_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/contact", post(contact::submit))
        .route(
            "/api/send-contact-email",
            post(contact::send_contact_email).layer(cors),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Announcements
        .merge(announcement_routes())
        // Contact
        .merge(contact_routes())
        // Admin back-office
        .nest("/admin", admin::routes())
}
