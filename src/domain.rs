//! Media model and presentation ordering

pub mod session;
pub mod undo;

pub use session::{SessionPhase, SorterSession, SweepStats};
pub use undo::{UndoEntry, UndoLedger};

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stable identity for a media item, derived from its source path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    pub fn from_source(path: &Path) -> Self {
        MediaId(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classifies a file extension; non-media extensions return `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "heic" | "heif" | "tif"
            | "tiff" | "avif" => Some(MediaType::Image),

            "mp4" | "mov" | "mkv" | "webm" | "avi" | "m4v" | "3gp" | "mts" => {
                Some(MediaType::Video)
            }

            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Image => "photo",
            MediaType::Video => "video",
        }
    }
}

/// One photo or video as surfaced by the catalog. Immutable after fetch.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub id: MediaId,
    pub media_type: MediaType,
    pub name: String,
    pub folder: String,
    pub size: u64,
    pub captured_at: DateTime<Utc>,
    pub path: PathBuf,
}

impl MediaItem {
    /// Builds an item from a filesystem path. The modification time stands
    /// in for the capture timestamp.
    pub fn from_path(path: &Path, media_type: MediaType) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let captured_at: DateTime<Utc> = metadata.modified()?.into();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let folder = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Ok(MediaItem {
            id: MediaId::from_source(path),
            media_type,
            name,
            folder,
            size: metadata.len(),
            captured_at,
            path: path.to_path_buf(),
        })
    }

    /// Items with no bytes or a blank name are never presented.
    pub fn is_valid(&self) -> bool {
        self.size > 0 && !self.name.trim().is_empty()
    }

    pub fn capture_date(&self) -> NaiveDate {
        self.captured_at.date_naive()
    }
}

/// Presentation order, decided once at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest capture first.
    #[default]
    Chronological,
    /// Dates shuffled, items shuffled within each date, groups concatenated.
    RandomizedByDay,
}

/// Orders a queue for presentation.
pub fn order_items(items: Vec<MediaItem>, order: SortOrder) -> Vec<MediaItem> {
    match order {
        SortOrder::Chronological => {
            let mut items = items;
            items.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
            items
        }
        SortOrder::RandomizedByDay => shuffle_by_day(items, &mut rand::rng()),
    }
}

/// Date-local randomization: group membership is preserved, only the date
/// order and the order within each date change.
pub(crate) fn shuffle_by_day<R: Rng>(items: Vec<MediaItem>, rng: &mut R) -> Vec<MediaItem> {
    let mut groups: Vec<(NaiveDate, Vec<MediaItem>)> = Vec::new();

    for item in items {
        let date = item.capture_date();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, group)) => group.push(item),
            None => groups.push((date, vec![item])),
        }
    }

    groups.shuffle(rng);

    let mut out = Vec::new();
    for (_, mut group) in groups {
        group.shuffle(rng);
        out.append(&mut group);
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    /// Builds a valid in-memory item; `day` selects the capture date.
    pub fn media_item(name: &str, day: u32) -> MediaItem {
        let captured_at = Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap();
        MediaItem {
            id: MediaId::from_source(Path::new(name)),
            media_type: MediaType::Image,
            name: name.to_string(),
            folder: "Camera".to_string(),
            size: 1024,
            captured_at,
            path: PathBuf::from(name),
        }
    }

    pub fn invalid_item(name: &str) -> MediaItem {
        let mut item = media_item(name, 1);
        item.size = 0;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::media_item;
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    mod media_type_tests {
        use super::*;

        #[test]
        fn test_image_extensions() {
            assert_eq!(MediaType::from_extension("jpg"), Some(MediaType::Image));
            assert_eq!(MediaType::from_extension("png"), Some(MediaType::Image));
            assert_eq!(MediaType::from_extension("heic"), Some(MediaType::Image));
        }

        #[test]
        fn test_video_extensions() {
            assert_eq!(MediaType::from_extension("mp4"), Some(MediaType::Video));
            assert_eq!(MediaType::from_extension("mov"), Some(MediaType::Video));
        }

        #[test]
        fn test_non_media_extensions() {
            assert_eq!(MediaType::from_extension("txt"), None);
            assert_eq!(MediaType::from_extension("pdf"), None);
            assert_eq!(MediaType::from_extension(""), None);
        }

        #[test]
        fn test_case_insensitive() {
            assert_eq!(MediaType::from_extension("JPG"), Some(MediaType::Image));
            assert_eq!(MediaType::from_extension("MP4"), Some(MediaType::Video));
        }
    }

    mod media_item_tests {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        #[test]
        fn test_from_path() {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("beach.jpg");
            fs::write(&path, b"not really a jpeg").unwrap();

            let item = MediaItem::from_path(&path, MediaType::Image).unwrap();

            assert_eq!(item.name, "beach.jpg");
            assert_eq!(item.size, 17);
            assert_eq!(item.media_type, MediaType::Image);
            assert_eq!(item.id, MediaId::from_source(&path));
            assert!(item.is_valid());
        }

        #[test]
        fn test_from_path_nonexistent() {
            let result = MediaItem::from_path(Path::new("/nonexistent/x.jpg"), MediaType::Image);
            assert!(result.is_err());
        }

        #[test]
        fn test_validity_predicate() {
            let item = media_item("ok.jpg", 1);
            assert!(item.is_valid());

            let mut zero = media_item("zero.jpg", 1);
            zero.size = 0;
            assert!(!zero.is_valid());

            let mut blank = media_item("x", 1);
            blank.name = "   ".to_string();
            assert!(!blank.is_valid());
        }
    }

    mod ordering_tests {
        use super::*;

        #[test]
        fn test_chronological_is_newest_first() {
            let items = vec![
                media_item("old.jpg", 1),
                media_item("new.jpg", 20),
                media_item("mid.jpg", 10),
            ];

            let ordered = order_items(items, SortOrder::Chronological);
            let names: Vec<_> = ordered.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["new.jpg", "mid.jpg", "old.jpg"]);
        }

        #[test]
        fn test_shuffle_by_day_preserves_group_membership() {
            // Two dates: {D1: [a, b], D2: [c]}. Every output must keep a and
            // b adjacent as a block relative to c.
            let items = vec![
                media_item("a.jpg", 1),
                media_item("b.jpg", 1),
                media_item("c.jpg", 2),
            ];

            for seed in 0..32 {
                let mut rng = StdRng::seed_from_u64(seed);
                let out = shuffle_by_day(items.clone(), &mut rng);
                let names: Vec<_> = out.iter().map(|i| i.name.as_str()).collect();

                let valid: [&[&str]; 4] = [
                    &["a.jpg", "b.jpg", "c.jpg"],
                    &["b.jpg", "a.jpg", "c.jpg"],
                    &["c.jpg", "a.jpg", "b.jpg"],
                    &["c.jpg", "b.jpg", "a.jpg"],
                ];
                assert!(
                    valid.iter().any(|v| *v == names.as_slice()),
                    "seed {} produced invalid interleaving {:?}",
                    seed,
                    names
                );
            }
        }

        #[test]
        fn test_shuffle_by_day_keeps_every_item() {
            let items: Vec<_> = (1..=9).map(|d| media_item(&format!("{d}.jpg"), d)).collect();
            let mut rng = StdRng::seed_from_u64(7);

            let out = shuffle_by_day(items.clone(), &mut rng);

            assert_eq!(out.len(), items.len());
            let mut names: Vec<_> = out.iter().map(|i| i.name.clone()).collect();
            names.sort();
            let mut expected: Vec<_> = items.iter().map(|i| i.name.clone()).collect();
            expected.sort();
            assert_eq!(names, expected);
        }
    }
}
