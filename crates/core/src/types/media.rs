//! Media kind for gallery items.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a media kind tag is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown media kind: {0:?}")]
pub struct MediaKindError(pub String);

/// The kind of a gallery item.
///
/// The canonical tags are `image` and `video`. Earlier snapshots of the
/// gallery wrote `photo` for images; [`MediaKind::parse`] accepts that
/// legacy tag on read but it is never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Parse a media kind tag, normalizing the legacy `photo` tag.
    ///
    /// # Errors
    ///
    /// Returns [`MediaKindError`] for any other tag.
    pub fn parse(s: &str) -> Result<Self, MediaKindError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "photo" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(MediaKindError(other.to_owned())),
        }
    }

    /// Canonical tag stored in the database and exposed over JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Storage prefix under the media bucket (`images/` or `videos/`).
    #[must_use]
    pub const fn storage_prefix(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = MediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_tags() {
        assert_eq!(MediaKind::parse("image").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::parse("video").unwrap(), MediaKind::Video);
    }

    #[test]
    fn test_parse_legacy_photo_tag() {
        // Older gallery rows were written with "photo"
        assert_eq!(MediaKind::parse("photo").unwrap(), MediaKind::Image);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(MediaKind::parse(" Video ").unwrap(), MediaKind::Video);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(MediaKind::parse("audio").is_err());
        assert!(MediaKind::parse("").is_err());
    }

    #[test]
    fn test_canonical_tag_never_photo() {
        assert_eq!(MediaKind::parse("photo").unwrap().as_str(), "image");
    }

    #[test]
    fn test_storage_prefix() {
        assert_eq!(MediaKind::Image.storage_prefix(), "images");
        assert_eq!(MediaKind::Video.storage_prefix(), "videos");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&MediaKind::Image).unwrap();
        assert_eq!(json, "\"image\"");

        let parsed: MediaKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(parsed, MediaKind::Video);
    }
}
