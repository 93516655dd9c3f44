//! History file persistence
//!
//! The whole store lives in one JSON document. Loads read the full file,
//! saves rewrite it completely; there is no incremental or partial update.
//! The document is the bare movie map, so files written by earlier tooling
//! load unchanged and saved files stay readable by it.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::HistoryResult;
use super::store::RatingStore;

/// Default history file name inside the cineclass config directory
pub const DEFAULT_HISTORY_FILE: &str = "historico.json";

/// Handle to the on-disk history document. Creating one touches nothing;
/// the file is only read on [`load`](Self::load) and written on
/// [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    /// Create a handle for `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The path this handle reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a history document exists at the path
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the store, or an empty one when no history has been written yet.
    ///
    /// A missing file is a normal first run, not an error.
    ///
    /// # Errors
    /// I/O failures while reading, or a parse failure when the file exists
    /// but is not a valid history document. The file is left untouched in
    /// both cases.
    pub fn load(&self) -> HistoryResult<RatingStore> {
        if !self.path.exists() {
            return Ok(RatingStore::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let store = serde_json::from_str(&content)?;
        Ok(store)
    }

    /// Overwrite the history document with the full store state.
    ///
    /// The parent directory is created on first save. Output is pretty
    /// printed for easy inspection.
    ///
    /// # Errors
    /// Directory creation, serialization, or write failures.
    pub fn save(&self, store: &RatingStore) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
