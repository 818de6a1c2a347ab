//! Undo ledger for trash actions
//!
//! Only trash actions are reversible; kept items never enter the ledger.
//! The ledger is strictly LIFO: peeking and popping only touch the top.

use super::{MediaId, MediaItem};
use chrono::{DateTime, Utc};

/// One reversible trash action.
#[derive(Debug, Clone)]
pub struct UndoEntry {
    pub item: MediaItem,
    /// Queue index the item occupied when it was trashed.
    pub restore_index: usize,
    pub recorded_at: DateTime<Utc>,
}

impl UndoEntry {
    pub fn new(item: MediaItem, restore_index: usize) -> Self {
        UndoEntry {
            item,
            restore_index,
            recorded_at: Utc::now(),
        }
    }
}

/// LIFO stack of trash actions. Lifetime is one sorter session; never
/// persisted.
#[derive(Debug, Default)]
pub struct UndoLedger {
    entries: Vec<UndoEntry>,
}

impl UndoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn peek_top(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub fn pop_top(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every entry recorded for the given item.
    pub fn purge(&mut self, id: &MediaId) {
        self.entries.retain(|e| &e.item.id != id);
    }
}
