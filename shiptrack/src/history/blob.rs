//! Key-value blob backends for persisted history.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::HistoryError;

/// Storage for the serialized history document.
pub trait HistoryBlob: Send + Sync {
    /// Read the stored document, `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<String>, HistoryError>;

    /// Replace the stored document.
    fn save(&self, contents: &str) -> Result<(), HistoryError>;

    /// Remove the stored document. Removing a missing document is not an error.
    fn clear(&self) -> Result<(), HistoryError>;

    /// Human-readable location for log messages.
    fn describe(&self) -> String;
}

/// Blob stored as `<dir>/<key>.json`.
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileBlob {
    path: PathBuf,
}

impl JsonFileBlob {
    pub fn new(directory: &Path, key: &str) -> Self {
        Self {
            path: directory.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryBlob for JsonFileBlob {
    fn load(&self) -> Result<Option<String>, HistoryError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, contents: &str) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(e)
        })
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory blob for tests and non-persistent runs.
#[derive(Debug, Default)]
pub struct MemoryBlob {
    contents: Mutex<Option<String>>,
}

impl MemoryBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blob pre-seeded with a document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl HistoryBlob for MemoryBlob {
    fn load(&self) -> Result<Option<String>, HistoryError> {
        Ok(self.contents.lock().clone())
    }

    fn save(&self, contents: &str) -> Result<(), HistoryError> {
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        *self.contents.lock() = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
