//! Seed command: starter content for a fresh database.
//!
//! Inserts a handful of gallery items (hosted placeholder photos) and a
//! welcome announcement. Does nothing when content already exists, so it
//! is safe to run repeatedly.

use aeestr_core::{Email, MediaKind};
use aeestr_site::db::gallery::NewGalleryItem;
use aeestr_site::db::{AnnouncementRepository, GalleryRepository};
use aeestr_site::services::media::file_name_from_url;

use super::CliError;

struct SeedItem {
    title: &'static str,
    description: &'static str,
    url: &'static str,
}

const SEED_GALLERY: &[SeedItem] = &[
    SeedItem {
        title: "Assemblée générale 2025",
        description: "Les membres réunis pour l'assemblée générale annuelle.",
        url: "https://images.unsplash.com/photo-1523580494863-6f3031224c94?w=800",
    },
    SeedItem {
        title: "Journée culturelle tchadienne",
        description: "Célébration de la culture tchadienne à Kigali.",
        url: "https://images.unsplash.com/photo-1511632765486-a01980e01a18?w=800",
    },
    SeedItem {
        title: "Tournoi de football inter-communautés",
        description: "Notre équipe lors du tournoi amical.",
        url: "https://images.unsplash.com/photo-1517466787929-bc90951d0974?w=800",
    },
    SeedItem {
        title: "Accueil des nouveaux étudiants",
        description: "Séance d'orientation pour les nouveaux arrivants.",
        url: "https://images.unsplash.com/photo-1529156069898-49953e39b3ac?w=800",
    },
];

/// Seed the database with starter content.
///
/// # Errors
///
/// Returns `CliError` on database failure.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let gallery = GalleryRepository::new(&pool);
    if gallery.list_all().await?.is_empty() {
        for item in SEED_GALLERY {
            let file_name = file_name_from_url(item.url).unwrap_or(item.url);
            gallery
                .insert(&NewGalleryItem {
                    title: item.title.to_string(),
                    description: Some(item.description.to_string()),
                    kind: MediaKind::Image,
                    url: item.url.to_string(),
                    thumbnail: None,
                    file_name: file_name.to_string(),
                    file_size: None,
                })
                .await?;
        }
        tracing::info!("Seeded {} gallery items", SEED_GALLERY.len());
    } else {
        tracing::info!("Gallery already has content, skipping");
    }

    let announcements = AnnouncementRepository::new(&pool);
    if announcements.list_all().await?.is_empty() {
        let author = Email::parse("contact@aeestr.org")
            .map_err(|e| CliError::InvalidEmail(e.to_string()))?;
        announcements
            .create(
                "Bienvenue sur le site de l'AEESTR",
                "Retrouvez ici les actualités et événements de l'association.",
                &author,
            )
            .await?;
        tracing::info!("Seeded welcome announcement");
    } else {
        tracing::info!("Announcements already exist, skipping");
    }

    Ok(())
}
