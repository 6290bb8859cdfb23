//! Services for the site.

pub mod auth;
pub mod email;
pub mod media;

pub use auth::{AuthError, AuthService};
pub use email::{ContactMailer, EmailError};
pub use media::{MediaStore, MediaStoreError};
