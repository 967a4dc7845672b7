//! Bounded position history.
//!
//! [`PositionHistory`] keeps the most recent live fixes in a FIFO ring and
//! mirrors every change to a [`HistoryBlob`]. The blob holds one JSON array of
//! [`HistoryEntry`] objects, oldest first.
//!
//! Persistence is best-effort. A blob that cannot be read or parsed yields an
//! empty history, and a failed save leaves the in-memory ring updated. Both
//! are logged.

mod blob;

pub use blob::{HistoryBlob, JsonFileBlob, MemoryBlob};

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::geo::Coordinate;
use crate::position::PositionRecord;

/// Default number of entries retained.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default blob key.
pub const DEFAULT_HISTORY_KEY: &str = "shiptrack_history";

/// Errors from history persistence.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid history document: {0}")]
    Format(#[from] serde_json::Error),
}

/// One persisted fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance to the reference point in miles, frozen at capture.
    pub distance: f64,
    pub speed: f64,
}

impl HistoryEntry {
    /// Entry for a live record captured now, with its distance to the
    /// reference point.
    pub fn from_record(record: &PositionRecord, distance: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            latitude: record.latitude,
            longitude: record.longitude,
            distance,
            speed: record.speed,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// FIFO ring of the most recent fixes, backed by a blob.
pub struct PositionHistory {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
    blob: Box<dyn HistoryBlob>,
}

impl PositionHistory {
    /// Load history from `blob`, keeping at most `max_entries` (minimum 1).
    ///
    /// Entries whose coordinates are out of range are discarded.
    pub fn load(blob: Box<dyn HistoryBlob>, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        let mut entries = match read_entries(blob.as_ref()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(blob = %blob.describe(), error = %e, "Discarding unreadable position history");
                VecDeque::new()
            }
        };

        let before = entries.len();
        entries.retain(|e| e.coordinate().is_valid());
        if entries.len() < before {
            warn!(
                blob = %blob.describe(),
                dropped = before - entries.len(),
                "Dropped history entries with out-of-range coordinates"
            );
        }

        if entries.len() > max_entries {
            let excess = entries.len() - max_entries;
            entries.drain(..excess);
            debug!(dropped = excess, "Truncated oversized history");
        }

        debug!(
            blob = %blob.describe(),
            entries = entries.len(),
            max_entries,
            "Position history loaded"
        );

        Self {
            entries,
            max_entries,
            blob,
        }
    }

    /// Non-persistent history.
    pub fn in_memory(max_entries: usize) -> Self {
        Self::load(Box::new(MemoryBlob::new()), max_entries)
    }

    /// Append an entry, evicting the oldest once the bound is exceeded, and
    /// persist the result.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.persist();
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// All entries, oldest first.
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drop every entry from memory and from the blob.
    pub fn reset(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.blob.clear()?;
        info!(blob = %self.blob.describe(), "Position history cleared");
        Ok(())
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(HistoryError::from)
            .and_then(|doc| self.blob.save(&doc));

        if let Err(e) = result {
            warn!(blob = %self.blob.describe(), error = %e, "Failed to persist position history");
        }
    }
}

impl std::fmt::Debug for PositionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionHistory")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .field("blob", &self.blob.describe())
            .finish()
    }
}

fn read_entries(blob: &dyn HistoryBlob) -> Result<VecDeque<HistoryEntry>, HistoryError> {
    match blob.load()? {
        Some(doc) if !doc.trim().is_empty() => Ok(serde_json::from_str(&doc)?),
        _ => Ok(VecDeque::new()),
    }
}
