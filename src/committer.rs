//! Deletion committer
//!
//! Turns a confirmed trash batch into actual deletions. Deletion is not
//! transactional across items: each delete stands alone, failures are
//! collected, and the outcome is surfaced as "N of M removed".

use crate::domain::{MediaId, MediaItem};
use crate::error::Result;
use std::fs;

/// Proof that the user confirmed deletion of a specific set of items.
/// Only consented ids are ever deleted.
#[derive(Debug, Clone)]
pub struct ConsentToken {
    ids: Vec<MediaId>,
    use_trash: bool,
}

impl ConsentToken {
    pub fn covers(&self, id: &MediaId) -> bool {
        self.ids.contains(id)
    }

    pub fn use_trash(&self) -> bool {
        self.use_trash
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Per-batch commit result. Partial success is expected, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<MediaId>,
}

impl CommitOutcome {
    pub fn is_partial(&self) -> bool {
        self.succeeded < self.attempted
    }

    pub fn summary(&self) -> String {
        format!("{} of {} removed", self.succeeded, self.attempted)
    }
}

pub trait DeletionCommitter {
    /// Asks for user consent to delete the given items. `None` means
    /// consent was not granted (or there was nothing to delete).
    fn request_consent(&self, items: &[MediaItem], use_trash: bool) -> Option<ConsentToken>;

    /// Deletes a single item. `Ok(false)` means the item was already gone.
    fn delete(&self, item: &MediaItem, use_trash: bool) -> Result<bool>;

    /// Deletes every consented item, collecting per-item results.
    fn delete_batch(&self, consent: &ConsentToken, items: &[MediaItem]) -> CommitOutcome;
}

/// Committer for a local filesystem library: system trash bin via the
/// `trash` crate, or permanent removal when the trash-bin sync setting is
/// off. Dry-run mode records outcomes without touching anything.
#[derive(Debug, Clone, Default)]
pub struct LocalCommitter {
    dry_run: bool,
}

impl LocalCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(dry_run: bool) -> Self {
        LocalCommitter { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl DeletionCommitter for LocalCommitter {
    fn request_consent(&self, items: &[MediaItem], use_trash: bool) -> Option<ConsentToken> {
        // In the terminal build the actual consent gesture is the commit
        // confirmation dialog; by the time this is called the user has
        // already agreed, so the token just pins down what was agreed to.
        if items.is_empty() {
            return None;
        }
        Some(ConsentToken {
            ids: items.iter().map(|i| i.id.clone()).collect(),
            use_trash,
        })
    }

    fn delete(&self, item: &MediaItem, use_trash: bool) -> Result<bool> {
        if self.dry_run {
            return Ok(true);
        }

        if !item.path.exists() {
            return Ok(false);
        }

        if use_trash {
            trash::delete(&item.path)
                .map_err(|e| crate::error::SweepError::Unknown(e.to_string()))?;
        } else {
            fs::remove_file(&item.path)?;
        }
        Ok(true)
    }

    fn delete_batch(&self, consent: &ConsentToken, items: &[MediaItem]) -> CommitOutcome {
        let mut succeeded = 0;
        let mut failed = Vec::new();
        let mut attempted = 0;

        for item in items {
            if !consent.covers(&item.id) {
                continue;
            }
            attempted += 1;

            match self.delete(item, consent.use_trash()) {
                Ok(_) => succeeded += 1,
                Err(err) => {
                    log::warn!("failed to remove {}: {err}", item.name);
                    failed.push(item.id.clone());
                }
            }
        }

        CommitOutcome {
            attempted,
            succeeded,
            failed,
        }
    }
}
