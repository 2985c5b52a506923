// 💾 Snapshot Persistence - whole-store load/save
//
// The store is always written as one unit: entries in order plus the
// category list. No partial writes; last write wins.

use crate::entry::Entry;
use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Serialized state of a store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub vocab_data: Vec<Entry>,

    #[serde(default)]
    pub categories: Vec<String>,
}

impl Snapshot {
    /// Parse snapshot JSON
    ///
    /// The top level must be an object; missing keys load as empty.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| VocabError::InvalidSnapshot(e.to_string()))?;
        if !value.is_object() {
            return Err(VocabError::InvalidSnapshot(
                "top level is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| VocabError::InvalidSnapshot(e.to_string()))
    }

    /// Parse a file the user asked to import
    ///
    /// Stricter than [`Snapshot::from_json`]: `vocab_data` must be present and
    /// be an array, so an unrelated JSON object cannot wipe the library.
    pub fn from_import_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| VocabError::InvalidSnapshot(e.to_string()))?;
        match value.get("vocab_data") {
            Some(data) if data.is_array() => {}
            Some(_) => {
                return Err(VocabError::InvalidSnapshot(
                    "'vocab_data' is not an array".to_string(),
                ))
            }
            None => {
                return Err(VocabError::InvalidSnapshot(
                    "missing 'vocab_data' array".to_string(),
                ))
            }
        }
        if let Some(categories) = value.get("categories") {
            if !categories.is_array() {
                return Err(VocabError::InvalidSnapshot(
                    "'categories' is not an array".to_string(),
                ));
            }
        }
        serde_json::from_value(value).map_err(|e| VocabError::InvalidSnapshot(e.to_string()))
    }

    /// Pretty JSON, non-ASCII text kept as-is
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| VocabError::PersistenceFailed(e.to_string()))
    }
}

// ============================================================================
// SNAPSHOT STORE
// ============================================================================

/// Backend that can load and save a full snapshot
pub trait SnapshotStore {
    /// `Ok(None)` when no snapshot exists yet
    fn load(&self) -> Result<Option<Snapshot>>;

    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Human-readable location for messages
    fn describe(&self) -> String;
}

// ============================================================================
// JSON FILE STORE
// ============================================================================

/// Snapshot stored as a JSON file, written atomically (temp file + rename)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        debug!("Loading snapshot from {:?}", self.path);

        if !self.path.exists() {
            debug!("No snapshot file found, starting fresh");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| VocabError::PersistenceFailed(format!("{}: {}", self.path.display(), e)))?;
        let snapshot = Snapshot::from_json(&content)
            .map_err(|e| VocabError::PersistenceFailed(format!("{}: {}", self.path.display(), e)))?;

        debug!(
            "Loaded {} entries, {} categories",
            snapshot.vocab_data.len(),
            snapshot.categories.len()
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        debug!(
            "Persisting {} entries to {:?}",
            snapshot.vocab_data.len(),
            self.path
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| VocabError::PersistenceFailed(e.to_string()))?;
            }
        }

        let content = snapshot.to_json()?;
        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path).map_err(|e| {
                VocabError::PersistenceFailed(format!("failed to create temp file: {}", e))
            })?;
            file.write_all(content.as_bytes())
                .map_err(|e| VocabError::PersistenceFailed(format!("failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| VocabError::PersistenceFailed(format!("failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            VocabError::PersistenceFailed(format!("failed to rename: {}", e))
        })?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Snapshot kept in memory; used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    saved: RefCell<Option<Snapshot>>,
    save_count: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::default();
        *store.saved.borrow_mut() = Some(snapshot);
        store
    }

    /// Make subsequent saves fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn saved(&self) -> Option<Snapshot> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves.get() {
            return Err(VocabError::PersistenceFailed("simulated failure".to_string()));
        }
        *self.saved.borrow_mut() = Some(snapshot.clone());
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
