//! Core types for the AEESTR site.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod media;

pub use email::{Email, EmailError};
pub use id::*;
pub use media::{MediaKind, MediaKindError};
