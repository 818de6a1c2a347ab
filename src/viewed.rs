//! Viewed-media ledger
//!
//! Small persisted set of capture dates that have already been presented.
//! The session treats it as an opaque exclusion filter applied before
//! load; it is updated with the dates actually shown when a session ends.

use crate::domain::MediaItem;
use crate::error::{Result, SweepError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewedLedger {
    dates: BTreeSet<NaiveDate>,
}

impl ViewedLedger {
    /// Ledger file path (~/.local/share/picsweep/viewed.json).
    pub fn ledger_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("picsweep").join("viewed.json"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::ledger_path().ok_or_else(|| {
            SweepError::Settings("could not determine data directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| SweepError::Settings(format!("failed to read viewed ledger: {e}")))?;

        serde_json::from_str(&contents)
            .map_err(|e| SweepError::Settings(format!("failed to parse viewed ledger: {e}")))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::ledger_path().ok_or_else(|| {
            SweepError::Settings("could not determine data directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SweepError::Settings(format!("failed to create directory: {e}")))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SweepError::Settings(format!("failed to serialize ledger: {e}")))?;

        fs::write(path, contents)
            .map_err(|e| SweepError::Settings(format!("failed to write ledger: {e}")))?;

        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn record(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    /// Records the capture dates of everything presented this session.
    pub fn record_items(&mut self, items: &[MediaItem]) {
        for item in items {
            self.dates.insert(item.capture_date());
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Drops items whose capture date has already been presented.
    pub fn filter_unviewed(&self, items: Vec<MediaItem>) -> Vec<MediaItem> {
        items
            .into_iter()
            .filter(|item| !self.contains(item.capture_date()))
            .collect()
    }
}
