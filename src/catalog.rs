//! Media catalog: independent image/video sources and their reconciliation

pub mod cache;

pub use cache::CatalogCache;

use crate::domain::{MediaItem, MediaType};
use crate::error::{Result, SweepError};
use std::fs;
use std::path::{Path, PathBuf};

/// A source of media items. Images and videos are queried independently
/// and may fail independently.
pub trait MediaCatalog: Send + Sync {
    fn fetch_images(&self) -> Result<Vec<MediaItem>>;
    fn fetch_videos(&self) -> Result<Vec<MediaItem>>;
}

/// Merges the two source results into one list, newest capture first.
///
/// One failed source is tolerated as long as the other produced items
/// (some media beats no media); the degradation is logged, not surfaced.
/// A failed source combined with an empty surviving set propagates the
/// failure so a permission problem never masquerades as an empty library.
/// Both sources succeeding with nothing to show is `NoMediaFound`, a
/// distinct condition from a fetch failure.
pub fn reconcile(
    images: Result<Vec<MediaItem>>,
    videos: Result<Vec<MediaItem>>,
) -> Result<Vec<MediaItem>> {
    let mut merged = match (images, videos) {
        (Ok(mut images), Ok(mut videos)) => {
            images.append(&mut videos);
            images
        }
        (Ok(survivors), Err(err)) | (Err(err), Ok(survivors)) => {
            if survivors.is_empty() {
                return Err(err);
            }
            log::warn!(
                "one media source failed ({err}); continuing with {} items",
                survivors.len()
            );
            survivors
        }
        (Err(images_err), Err(videos_err)) => {
            log::warn!("video source also failed: {videos_err}");
            return Err(images_err);
        }
    };

    if merged.is_empty() {
        return Err(SweepError::NoMediaFound);
    }

    merged.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    Ok(merged)
}

/// Directory-backed catalog: scans one folder level, classifying entries
/// by extension. Hidden files, subdirectories, and unreadable entries are
/// skipped.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    root: PathBuf,
}

impl FsCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsCatalog { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan(&self, wanted: MediaType) -> Result<Vec<MediaItem>> {
        let entries = fs::read_dir(&self.root).map_err(SweepError::from_fetch_io)?;
        let mut items = Vec::new();

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }

            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if MediaType::from_extension(ext) != Some(wanted) {
                continue;
            }

            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };
            if metadata.is_dir() {
                continue;
            }

            match MediaItem::from_path(&path, wanted) {
                Ok(item) => items.push(item),
                Err(_) => continue,
            }
        }

        Ok(items)
    }
}

impl MediaCatalog for FsCatalog {
    fn fetch_images(&self) -> Result<Vec<MediaItem>> {
        self.scan(MediaType::Image)
    }

    fn fetch_videos(&self) -> Result<Vec<MediaItem>> {
        self.scan(MediaType::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::media_item;
    use std::fs;
    use tempfile::TempDir;

    mod reconcile_tests {
        use super::*;

        #[test]
        fn test_merge_is_newest_first() {
            let images = Ok(vec![media_item("old.jpg", 1), media_item("new.jpg", 20)]);
            let videos = Ok(vec![media_item("mid.mp4", 10)]);

            let merged = reconcile(images, videos).unwrap();
            let names: Vec<_> = merged.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["new.jpg", "mid.mp4", "old.jpg"]);
        }

        #[test]
        fn test_one_failed_source_degrades_gracefully() {
            let images = Ok(vec![media_item("a.jpg", 1)]);
            let videos = Err(SweepError::LoadFailure("store offline".into()));

            let merged = reconcile(images, videos).unwrap();
            assert_eq!(merged.len(), 1);
        }

        #[test]
        fn test_empty_survivor_propagates_the_failure() {
            // images = [], videos = PermissionDenied: must fail with
            // PermissionDenied, not look silently empty.
            let images = Ok(Vec::new());
            let videos = Err(SweepError::PermissionDenied("videos".into()));

            let result = reconcile(images, videos);
            assert!(matches!(result, Err(SweepError::PermissionDenied(_))));
        }

        #[test]
        fn test_both_failed_propagates_image_error() {
            let images = Err(SweepError::PermissionDenied("images".into()));
            let videos = Err(SweepError::LoadFailure("videos".into()));

            let result = reconcile(images, videos);
            assert!(matches!(result, Err(SweepError::PermissionDenied(_))));
        }

        #[test]
        fn test_both_empty_is_no_media_found() {
            let result = reconcile(Ok(Vec::new()), Ok(Vec::new()));
            assert!(matches!(result, Err(SweepError::NoMediaFound)));
        }
    }

    mod fs_catalog_tests {
        use super::*;

        #[test]
        fn test_scan_classifies_by_extension() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            fs::write(dir.join("a.jpg"), b"img").unwrap();
            fs::write(dir.join("b.mp4"), b"vid").unwrap();
            fs::write(dir.join("notes.txt"), b"text").unwrap();

            let catalog = FsCatalog::new(dir);

            let images = catalog.fetch_images().unwrap();
            assert_eq!(images.len(), 1);
            assert_eq!(images[0].name, "a.jpg");

            let videos = catalog.fetch_videos().unwrap();
            assert_eq!(videos.len(), 1);
            assert_eq!(videos[0].name, "b.mp4");
        }

        #[test]
        fn test_scan_skips_hidden_and_directories() {
            let temp_dir = TempDir::new().unwrap();
            let dir = temp_dir.path();
            fs::write(dir.join(".hidden.jpg"), b"img").unwrap();
            fs::create_dir(dir.join("album.jpg")).unwrap();
            fs::write(dir.join("visible.jpg"), b"img").unwrap();

            let catalog = FsCatalog::new(dir);
            let images = catalog.fetch_images().unwrap();

            assert_eq!(images.len(), 1);
            assert_eq!(images[0].name, "visible.jpg");
        }

        #[test]
        fn test_scan_missing_directory_maps_to_taxonomy() {
            let catalog = FsCatalog::new("/nonexistent/photos-12345");
            let result = catalog.fetch_images();
            assert!(matches!(result, Err(SweepError::NoMediaFound)));
        }

        #[test]
        fn test_empty_directory_reconciles_to_no_media() {
            let temp_dir = TempDir::new().unwrap();
            let catalog = FsCatalog::new(temp_dir.path());

            let result = reconcile(catalog.fetch_images(), catalog.fetch_videos());
            assert!(matches!(result, Err(SweepError::NoMediaFound)));
        }
    }
}
