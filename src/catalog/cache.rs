//! Fetch-once catalog cache
//!
//! A full-library scan can cover thousands of files, so the result is
//! fetched once and reused until explicitly invalidated. The async mutex
//! is held across the whole check/fetch/populate sequence: a second
//! request arriving mid-fetch waits for the first and reuses its result
//! instead of triggering a duplicate scan.

use super::{reconcile, MediaCatalog};
use crate::domain::MediaItem;
use crate::error::{Result, SweepError};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct CatalogCache {
    provider: Arc<dyn MediaCatalog>,
    slot: Mutex<Option<Arc<Vec<MediaItem>>>>,
}

impl CatalogCache {
    pub fn new(provider: Arc<dyn MediaCatalog>) -> Self {
        CatalogCache {
            provider,
            slot: Mutex::new(None),
        }
    }

    /// Returns the reconciled library, scanning at most once per cache
    /// generation. Failures are not cached; the next call scans again.
    pub async fn fetch(&self) -> Result<Arc<Vec<MediaItem>>> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let provider = Arc::clone(&self.provider);
        let (images, videos) =
            tokio::task::spawn_blocking(move || (provider.fetch_images(), provider.fetch_videos()))
                .await
                .map_err(|e| SweepError::Unknown(format!("catalog scan task failed: {e}")))?;

        let merged = Arc::new(reconcile(images, videos)?);
        *slot = Some(Arc::clone(&merged));
        Ok(merged)
    }

    /// Drops the cached library so the next `fetch` rescans.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::media_item;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        scans: AtomicUsize,
    }

    impl CountingCatalog {
        fn new() -> Self {
            CountingCatalog {
                scans: AtomicUsize::new(0),
            }
        }
    }

    impl MediaCatalog for CountingCatalog {
        fn fetch_images(&self) -> Result<Vec<MediaItem>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(vec![media_item("a.jpg", 1)])
        }

        fn fetch_videos(&self) -> Result<Vec<MediaItem>> {
            Ok(Vec::new())
        }
    }

    struct FailingCatalog;

    impl MediaCatalog for FailingCatalog {
        fn fetch_images(&self) -> Result<Vec<MediaItem>> {
            Err(SweepError::PermissionDenied("photos".into()))
        }

        fn fetch_videos(&self) -> Result<Vec<MediaItem>> {
            Err(SweepError::PermissionDenied("videos".into()))
        }
    }

    #[tokio::test]
    async fn test_second_fetch_reuses_first_scan() {
        let provider = Arc::new(CountingCatalog::new());
        let cache = CatalogCache::new(Arc::clone(&provider) as Arc<dyn MediaCatalog>);

        let first = cache.fetch().await.unwrap();
        let second = cache.fetch().await.unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.scans.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_scan_once() {
        let provider = Arc::new(CountingCatalog::new());
        let cache = CatalogCache::new(Arc::clone(&provider) as Arc<dyn MediaCatalog>);

        let (a, b) = tokio::join!(cache.fetch(), cache.fetch());

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(provider.scans.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_rescan() {
        let provider = Arc::new(CountingCatalog::new());
        let cache = CatalogCache::new(Arc::clone(&provider) as Arc<dyn MediaCatalog>);

        cache.fetch().await.unwrap();
        cache.invalidate().await;
        cache.fetch().await.unwrap();

        assert_eq!(provider.scans.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = CatalogCache::new(Arc::new(FailingCatalog));

        assert!(cache.fetch().await.is_err());

        // The slot stays empty so a retry fetches again (and fails again
        // here, but with a fresh scan rather than a cached error).
        assert!(cache.fetch().await.is_err());
    }
}
