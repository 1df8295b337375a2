//! Local filesystem image storage.
//!
//! Image paths are stored on posts relative to the image root, e.g.
//! `images/4f0c...-cat.png`. Only paths inside the `images` directory are
//! ever written or removed.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{is_allowed_image, IMAGE_SUBDIR};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Image storage trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an uploaded image, returning its relative path.
    async fn save_image(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<String>;

    /// Remove a stored image. Failures are logged, never returned.
    async fn clear_image(&self, image_url: &str);
}

/// Stores images under `<root>/images`.
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory uploaded images are written to
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMAGE_SUBDIR)
    }

    /// Resolve a stored path, refusing anything outside the image directory.
    fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        let relative = Path::new(image_url);
        let mut components = relative.components();

        match components.next() {
            Some(Component::Normal(first)) if first == IMAGE_SUBDIR => {}
            _ => return None,
        }

        let mut rest = components.peekable();
        rest.peek()?;
        if !rest.all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save_image(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<String> {
        if !is_allowed_image(file_name) {
            return Err(AppError::invalid_field("image", "Only png, jpg and jpeg images are allowed"));
        }

        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        tokio::fs::create_dir_all(self.image_dir()).await?;
        tokio::fs::write(self.image_dir().join(&stored_name), bytes).await?;

        let image_url = format!("{}/{}", IMAGE_SUBDIR, stored_name);
        debug!("Stored image {}", image_url);
        Ok(image_url)
    }

    async fn clear_image(&self, image_url: &str) {
        let Some(path) = self.resolve(image_url) else {
            warn!("Refusing to remove image outside image directory: {}", image_url);
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!("Removed image {}", image_url),
            Err(e) => warn!("Failed to remove image {}: {}", image_url, e),
        }
    }
}

/// Keep only characters that are safe in a file name.
fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_accepts_image_paths() {
        let store = LocalImageStore::new("/srv/app");
        assert_eq!(
            store.resolve("images/cat.png"),
            Some(PathBuf::from("/srv/app/images/cat.png"))
        );
    }

    #[test]
    fn test_resolve_refuses_escapes() {
        let store = LocalImageStore::new("/srv/app");
        assert_eq!(store.resolve("../etc/passwd"), None);
        assert_eq!(store.resolve("images/../../etc/passwd"), None);
        assert_eq!(store.resolve("/etc/passwd"), None);
        assert_eq!(store.resolve("config/app.toml"), None);
        assert_eq!(store.resolve("images"), None);
        assert_eq!(store.resolve(""), None);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my cat.png"), "my-cat.png");
        assert_eq!(sanitize_file_name("../../evil.png"), "evil.png");
    }

    #[tokio::test]
    async fn test_save_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let image_url = store.save_image("cat.png", vec![1, 2, 3]).await.unwrap();
        assert!(image_url.starts_with("images/"));
        assert!(image_url.ends_with("-cat.png"));

        let path = dir.path().join(&image_url);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        store.clear_image(&image_url).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_save_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let result = store.save_image("notes.txt", vec![1]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_clear_missing_image_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        store.clear_image("images/missing.png").await;
        store.clear_image("../outside.png").await;
    }

    #[tokio::test]
    async fn test_clear_outside_root_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("keep.png");
        std::fs::write(&outside, b"x").unwrap();
        let store = LocalImageStore::new(dir.path().join("root"));

        store.clear_image("images/../../keep.png").await;
        assert!(outside.exists());
    }
}
