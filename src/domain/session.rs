//! Sorter session state machine
//!
//! Holds the working queue, the cursor, the trashed batch, and the undo
//! ledger for one pass through the library. The queue vector is stable for
//! the whole session: deciding an item moves the cursor past it, and
//! trashing additionally records the item in the `trashed` side-list and
//! on the ledger. Undo moves the cursor back to the exact index the
//! trashed item occupied, so items decided after it are re-presented in
//! their original order.
//!
//! All mutation happens on one owner (the UI loop); nothing here locks.

use super::undo::{UndoEntry, UndoLedger};
use super::{order_items, MediaId, MediaItem, SortOrder};
use crate::error::{Result, SweepError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No data loaded.
    #[default]
    Idle,
    /// A catalog fetch is in flight.
    Loading,
    /// Queue non-empty, cursor on an undecided item.
    Active,
    /// Cursor advanced past the last item.
    Completed,
}

/// Counters for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepStats {
    pub total: usize,
    pub kept: usize,
    /// Trash decisions this session, committed ones included.
    pub trashed: usize,
    pub remaining: usize,
    /// Byte volume of the pending (uncommitted) trashed batch.
    pub trashed_bytes: u64,
}

/// The aggregate root of one triage pass. Not persisted: closing the app
/// discards the queue position and the catalog is re-fetched next time.
#[derive(Debug, Default)]
pub struct SorterSession {
    /// Full valid item list as loaded, kept for `reset`.
    source: Vec<MediaItem>,
    order: SortOrder,
    queue: Vec<MediaItem>,
    position: usize,
    trashed: Vec<MediaItem>,
    /// Items deleted by an earlier commit this session.
    committed: usize,
    ledger: UndoLedger,
    phase: SessionPhase,
}

impl SorterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn queue(&self) -> &[MediaItem] {
        &self.queue
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn trashed(&self) -> &[MediaItem] {
        &self.trashed
    }

    pub fn ledger_depth(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Marks the session as waiting on a catalog fetch.
    pub fn begin_loading(&mut self) {
        self.phase = SessionPhase::Loading;
    }

    /// Installs a freshly fetched item list. Invalid items (zero bytes or
    /// blank name) are dropped and never presented; if nothing valid
    /// remains the session stays `Idle` and `NoMediaFound` is returned.
    pub fn load(&mut self, items: Vec<MediaItem>, order: SortOrder) -> Result<()> {
        let valid: Vec<MediaItem> = items.into_iter().filter(MediaItem::is_valid).collect();

        if valid.is_empty() {
            self.phase = SessionPhase::Idle;
            return Err(SweepError::NoMediaFound);
        }

        self.source = valid.clone();
        self.order = order;
        self.queue = order_items(valid, order);
        self.position = 0;
        self.trashed.clear();
        self.committed = 0;
        self.ledger.clear();
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Starts over from the full item list. A randomized order is
    /// re-shuffled; all decisions and undo history are discarded.
    pub fn reset(&mut self) -> Result<()> {
        let source = std::mem::take(&mut self.source);
        self.load(source, self.order)
    }

    /// The item under the cursor, or `None` when there is nothing to
    /// decide (not yet loaded, or completed).
    pub fn current(&self) -> Option<&MediaItem> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        self.queue.get(self.position)
    }

    /// Advances past the current item, leaving it kept. Kept items are not
    /// undoable. Returns false when there is no current item.
    pub fn keep_current(&mut self) -> bool {
        if self.current().is_none() {
            return false;
        }
        self.advance();
        true
    }

    /// Marks the current item for deletion: records it in the trashed
    /// batch and on the undo ledger, then advances like `keep_current`.
    /// Returns the trashed item so the caller can offer a timed undo;
    /// no-op returning `None` when there is no current item.
    pub fn trash_current(&mut self) -> Option<MediaItem> {
        let item = self.current()?.clone();

        self.trashed.push(item.clone());
        self.ledger.push(UndoEntry::new(item.clone(), self.position));
        self.advance();

        Some(item)
    }

    /// Reverts the most recent trash action. The item leaves the trashed
    /// batch and the cursor returns to the exact index the item occupied,
    /// so everything decided after it is re-presented in original order.
    /// Always returns the session to `Active`, even from `Completed`.
    /// Returns false when the ledger is empty.
    pub fn undo_last_trash(&mut self) -> bool {
        let Some(entry) = self.ledger.pop_top() else {
            return false;
        };

        if let Some(idx) = self.trashed.iter().rposition(|t| t.id == entry.item.id) {
            self.trashed.remove(idx);
        }

        // The queue is stable so the item is normally still in place;
        // reinsert at the clamped index if it is not.
        let restore = entry.restore_index.min(self.queue.len());
        if self.queue.get(restore).map(|q| &q.id) != Some(&entry.item.id) {
            self.queue.insert(restore, entry.item);
        }

        self.position = restore;
        self.phase = SessionPhase::Active;
        true
    }

    /// Excuses an item from deletion without touching the queue or the
    /// cursor: it will not re-enter the decision flow. Its undo history
    /// goes with it, so a later undo cannot pull it back in either. Used
    /// by the review screen.
    pub fn remove_from_trashed(&mut self, id: &MediaId) -> bool {
        match self.trashed.iter().position(|t| &t.id == id) {
            Some(idx) => {
                self.trashed.remove(idx);
                self.ledger.purge(id);
                true
            }
            None => false,
        }
    }

    /// Drops undo history without altering queue, trashed batch, or
    /// cursor. Called when leaving the session context so stale restore
    /// positions cannot be replayed.
    pub fn clear_undo_ledger(&mut self) {
        self.ledger.clear();
    }

    /// Removes successfully committed items from the trashed batch.
    /// Items that failed to delete stay behind for a later retry; the
    /// commit is not transactional across items.
    pub fn mark_committed(&mut self, succeeded: &[MediaId]) {
        let before = self.trashed.len();
        self.trashed.retain(|t| !succeeded.contains(&t.id));
        self.committed += before - self.trashed.len();
    }

    pub fn stats(&self) -> SweepStats {
        let decided = self.position.min(self.queue.len());
        let trashed = self.trashed.len() + self.committed;
        SweepStats {
            total: self.queue.len(),
            kept: decided.saturating_sub(trashed),
            trashed,
            remaining: self.queue.len().saturating_sub(self.position),
            trashed_bytes: self.trashed.iter().map(|t| t.size).sum(),
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        if self.position >= self.queue.len() {
            self.phase = SessionPhase::Completed;
        }
    }
}
