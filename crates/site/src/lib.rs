//! AEESTR community site.
//!
//! Server-rendered public site (hero, about, services, gallery, contact)
//! with an announcement banner and an admin back-office for managing
//! gallery media and announcements.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
