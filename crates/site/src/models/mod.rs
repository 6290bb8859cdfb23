//! Domain models for the site.

pub mod admin_user;
pub mod announcement;
pub mod contact;
pub mod gallery;
pub mod session;

pub use admin_user::AdminUser;
pub use announcement::Announcement;
pub use contact::ContactSubmission;
pub use gallery::GalleryItem;
pub use session::{CurrentAdmin, keys as session_keys};
