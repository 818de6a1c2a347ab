//! picsweep - terminal photo and video triage
//!
//! This crate provides the core of the picsweep application: a sorter
//! session state machine with an undo ledger, catalog reconciliation with
//! a fetch-once cache, and a deletion committer, plus the terminal
//! interface wired around them.

pub mod catalog;
pub mod cli;
pub mod committer;
pub mod domain;
pub mod error;
pub mod preview;
pub mod settings;
pub mod tui;
pub mod viewed;

// Re-export primary types for convenience
pub use catalog::{CatalogCache, FsCatalog, MediaCatalog};
pub use committer::{CommitOutcome, ConsentToken, DeletionCommitter, LocalCommitter};
pub use domain::{
    MediaId, MediaItem, MediaType, SessionPhase, SortOrder, SorterSession, SweepStats, UndoEntry,
    UndoLedger,
};
pub use error::{Result, SweepError};
pub use settings::{AppSettings, ThemeMode};
pub use viewed::ViewedLedger;
