//! On-disk media store for gallery uploads.
//!
//! Files live under the configured media root with one prefix per kind
//! (`images/`, `videos/`) and are served publicly at `/media/...`.
//! Stored names are generated (UUID plus the original extension), so the
//! trailing URL segment is always safe to map back to a path on delete.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use aeestr_core::MediaKind;

/// Public URL prefix the media root is served under.
pub const PUBLIC_PREFIX: &str = "/media";

/// Longest accepted file extension.
const MAX_EXTENSION_LENGTH: usize = 8;

/// Errors that can occur in the media store.
#[derive(Debug, Error)]
pub enum MediaStoreError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL or file name could not be mapped to a stored file.
    #[error("invalid media file name: {0:?}")]
    InvalidFileName(String),

    /// The stored file does not exist.
    #[error("stored file not found")]
    NotFound,
}

/// A stored file's generated name and public URL.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub file_name: String,
    pub public_url: String,
}

/// Media store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a media store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an uploaded file under the kind's prefix with a generated name.
    ///
    /// # Errors
    ///
    /// Returns `MediaStoreError::Io` if the directory or file cannot be written.
    pub async fn store(
        &self,
        kind: MediaKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredMedia, MediaStoreError> {
        let file_name = match sanitize_extension(original_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let dir = self.root.join(kind.storage_prefix());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let public_url = format!("{PUBLIC_PREFIX}/{}/{file_name}", kind.storage_prefix());
        tracing::debug!(file = %file_name, kind = %kind, "Stored media file");

        Ok(StoredMedia {
            file_name,
            public_url,
        })
    }

    /// Remove the stored file a gallery URL points at.
    ///
    /// The path is derived from the URL's trailing segment plus the kind's
    /// prefix, mirroring how it was stored.
    ///
    /// # Errors
    ///
    /// Returns `MediaStoreError::InvalidFileName` if the URL has no usable
    /// trailing segment, `MediaStoreError::NotFound` if the file is already
    /// gone, or `MediaStoreError::Io` for other filesystem errors.
    pub async fn delete_by_url(&self, kind: MediaKind, url: &str) -> Result<(), MediaStoreError> {
        let file_name = file_name_from_url(url)
            .ok_or_else(|| MediaStoreError::InvalidFileName(url.to_string()))?;

        let path = self.root.join(kind.storage_prefix()).join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(MediaStoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

/// Extract the trailing file segment of a stored media URL.
///
/// Rejects anything that could escape the storage directory.
#[must_use]
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let tail = url.rsplit('/').next()?;
    let tail = tail.split('?').next()?;
    if tail.is_empty() || tail == "." || tail == ".." || tail.contains('\\') {
        return None;
    }
    Some(tail)
}

/// Lowercase the original file's extension, dropping anything suspicious.
fn sanitize_extension(original_name: &str) -> Option<String> {
    let (_, ext) = original_name.rsplit_once('.')?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LENGTH
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!("aeestr-media-test-{}", Uuid::new_v4()));
        MediaStore::new(dir)
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("/media/images/abc123.jpg"),
            Some("abc123.jpg")
        );
        assert_eq!(
            file_name_from_url("https://example.com/media/videos/v.mp4"),
            Some("v.mp4")
        );
        assert_eq!(
            file_name_from_url("/media/images/abc.jpg?width=400"),
            Some("abc.jpg")
        );
    }

    #[test]
    fn test_file_name_from_url_rejects_traversal() {
        assert_eq!(file_name_from_url("/media/images/"), None);
        assert_eq!(file_name_from_url("/media/images/.."), None);
        assert_eq!(file_name_from_url("a\\b"), None);
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("photo.JPG"), Some("jpg".to_string()));
        assert_eq!(sanitize_extension("clip.mp4"), Some("mp4".to_string()));
        assert_eq!(sanitize_extension("no-extension"), None);
        assert_eq!(sanitize_extension("weird.j/pg"), None);
        assert_eq!(sanitize_extension("trailing-dot."), None);
    }

    #[tokio::test]
    async fn test_store_and_delete_roundtrip() {
        let store = temp_store();
        let stored = store
            .store(MediaKind::Image, "ceremony.jpg", b"fake image bytes")
            .await
            .unwrap();

        assert!(stored.public_url.starts_with("/media/images/"));
        assert!(stored.file_name.ends_with(".jpg"));

        let on_disk = store.root().join("images").join(&stored.file_name);
        assert!(on_disk.exists());

        store
            .delete_by_url(MediaKind::Image, &stored.public_url)
            .await
            .unwrap();
        assert!(!on_disk.exists());

        tokio::fs::remove_dir_all(store.root()).await.ok();
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let store = temp_store();
        // Prefix dir exists but the file does not
        tokio::fs::create_dir_all(store.root().join("videos"))
            .await
            .unwrap();

        let result = store
            .delete_by_url(MediaKind::Video, "/media/videos/gone.mp4")
            .await;
        assert!(matches!(result, Err(MediaStoreError::NotFound)));

        tokio::fs::remove_dir_all(store.root()).await.ok();
    }

    #[tokio::test]
    async fn test_stored_names_are_unique() {
        let store = temp_store();
        let a = store.store(MediaKind::Image, "x.png", b"a").await.unwrap();
        let b = store.store(MediaKind::Image, "x.png", b"b").await.unwrap();
        assert_ne!(a.file_name, b.file_name);

        tokio::fs::remove_dir_all(store.root()).await.ok();
    }
}
