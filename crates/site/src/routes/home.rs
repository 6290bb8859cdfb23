//! Home page route handler.
//!
//! The whole public site is one server-rendered page: hero, about,
//! services, gallery and contact sections, plus the announcement banner
//! when at least one announcement is active.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use aeestr_core::MediaKind;

use crate::db::{AnnouncementRepository, GalleryRepository};
use crate::error::AppError;
use crate::filters;
use crate::models::gallery::{count_kind, filter_by_kind};
use crate::models::{Announcement, GalleryItem};
use crate::routes::announcements::BannerView;
use crate::state::AppState;

/// Hero section content.
pub struct HeroSection {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub tagline: &'static str,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            title: "AEESTR",
            subtitle: "Association des Élèves, Étudiants et Stagiaires Tchadiens au Rwanda",
            tagline: "Unis pour la réussite, solidaires pour l'avenir",
        }
    }
}

/// About section content.
pub struct AboutSection {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
}

impl Default for AboutSection {
    fn default() -> Self {
        Self {
            heading: "Qui sommes-nous ?",
            paragraphs: &[
                "L'AEESTR rassemble les élèves, étudiants et stagiaires tchadiens \
                 établis au Rwanda. Elle accompagne ses membres tout au long de \
                 leur parcours académique, de l'arrivée à Kigali jusqu'à \
                 l'obtention du diplôme.",
                "L'association favorise l'entraide, le partage d'expérience et le \
                 rayonnement de la communauté tchadienne au sein des institutions \
                 rwandaises.",
            ],
        }
    }
}

/// A single service or objective card.
pub struct ServiceCard {
    pub title: &'static str,
    pub description: &'static str,
}

/// Services section content.
pub struct ServicesSection {
    pub heading: &'static str,
    pub cards: &'static [ServiceCard],
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self {
            heading: "Nos services",
            cards: &[
                ServiceCard {
                    title: "Accueil et orientation",
                    description: "Accompagnement des nouveaux arrivants dans leurs \
                                  démarches administratives et leur installation.",
                },
                ServiceCard {
                    title: "Soutien académique",
                    description: "Tutorat, groupes d'étude et partage de ressources \
                                  entre étudiants.",
                },
                ServiceCard {
                    title: "Vie communautaire",
                    description: "Rencontres culturelles, sportives et célébrations \
                                  des fêtes nationales.",
                },
                ServiceCard {
                    title: "Représentation",
                    description: "Porte-parole des étudiants tchadiens auprès des \
                                  institutions et partenaires.",
                },
            ],
        }
    }
}

/// A gallery item prepared for rendering.
pub struct GalleryItemView {
    pub title: String,
    pub description: String,
    pub kind: &'static str,
    pub url: String,
    pub thumbnail: Option<String>,
    pub uploaded_on: String,
}

impl From<GalleryItem> for GalleryItemView {
    fn from(item: GalleryItem) -> Self {
        Self {
            title: item.title,
            description: item.description.unwrap_or_default(),
            kind: item.kind.as_str(),
            url: item.url,
            thumbnail: item.thumbnail,
            uploaded_on: item.uploaded_at.format("%d/%m/%Y").to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub services: ServicesSection,
    pub gallery: Vec<GalleryItemView>,
    pub image_count: usize,
    pub video_count: usize,
    pub active_filter: &'static str,
    pub banner: Option<BannerView>,
}

/// Query parameters for the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Gallery filter: `image`, `video` or absent for everything.
    pub media: Option<String>,
}

/// Parse the gallery filter, treating unknown values as "all".
fn parse_filter(media: Option<&str>) -> (Option<MediaKind>, &'static str) {
    match media.map(MediaKind::parse) {
        Some(Ok(kind)) => (Some(kind), kind.as_str()),
        _ => (None, "all"),
    }
}

/// GET / - Render the home page.
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate, AppError> {
    let items = GalleryRepository::new(state.pool()).list_all().await?;
    let announcements = AnnouncementRepository::new(state.pool())
        .list_active()
        .await?;

    let (kind, active_filter) = parse_filter(query.media.as_deref());

    let image_count = count_kind(&items, MediaKind::Image);
    let video_count = count_kind(&items, MediaKind::Video);
    let gallery = filter_by_kind(&items, kind)
        .into_iter()
        .map(GalleryItemView::from)
        .collect();

    Ok(HomeTemplate {
        hero: HeroSection::default(),
        about: AboutSection::default(),
        services: ServicesSection::default(),
        gallery,
        image_count,
        video_count,
        active_filter,
        banner: banner_view(&announcements),
    })
}

/// Build the banner view for the first (newest) active announcement.
fn banner_view(announcements: &[Announcement]) -> Option<BannerView> {
    if announcements.is_empty() {
        None
    } else {
        Some(BannerView::at_index(announcements, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_known_kinds() {
        assert_eq!(parse_filter(Some("image")), (Some(MediaKind::Image), "image"));
        assert_eq!(parse_filter(Some("video")), (Some(MediaKind::Video), "video"));
    }

    #[test]
    fn test_parse_filter_legacy_tag() {
        // Old links used "photo" for images
        assert_eq!(parse_filter(Some("photo")), (Some(MediaKind::Image), "image"));
    }

    #[test]
    fn test_parse_filter_unknown_is_all() {
        assert_eq!(parse_filter(Some("gif")), (None, "all"));
        assert_eq!(parse_filter(None), (None, "all"));
    }
}
