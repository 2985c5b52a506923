// 🗂️ Library - the vocabulary store bound to a snapshot backend
//
// Every successful mutation is followed by a full snapshot save. A failed
// save never rolls back the in-memory change; it is handed back to the
// caller as a warning instead.

use crate::entry::{Entry, EntryUpdate};
use crate::error::{Result, VocabError};
use crate::persistence::{Snapshot, SnapshotStore};
use crate::store::VocabStore;
use tracing::{info, warn};

/// Value of a successful mutation plus the outcome of the save that followed
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a failed save should be reported to the user"]
pub struct Persisted<T> {
    pub value: T,
    pub save_error: Option<VocabError>,
}

impl<T> Persisted<T> {
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Result of opening a library
pub struct Opened<S: SnapshotStore> {
    pub library: Library<S>,
    /// Set when an existing snapshot could not be read; the library then
    /// starts empty with the default categories
    pub load_error: Option<VocabError>,
}

pub struct Library<S: SnapshotStore> {
    store: VocabStore,
    backend: S,
}

impl<S: SnapshotStore> Library<S> {
    /// Load from `backend`, degrading to an empty store on failure
    pub fn open(backend: S) -> Opened<S> {
        let (store, load_error) = match backend.load() {
            Ok(Some(snapshot)) => {
                let store = VocabStore::from_snapshot(snapshot);
                info!(
                    "Loaded {} entries from {}",
                    store.len(),
                    backend.describe()
                );
                (store, None)
            }
            Ok(None) => {
                info!("No snapshot at {}, starting a new library", backend.describe());
                (VocabStore::new(), None)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", backend.describe(), e);
                (VocabStore::new(), Some(e))
            }
        };

        Opened {
            library: Library { store, backend },
            load_error,
        }
    }

    pub fn store(&self) -> &VocabStore {
        &self.store
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Save the whole store now
    pub fn save(&self) -> Result<()> {
        self.backend.save(&self.store.snapshot())
    }

    fn persisted<T>(&self, value: T) -> Persisted<T> {
        let save_error = match self.save() {
            Ok(()) => None,
            Err(e) => {
                warn!("Save to {} failed: {}", self.backend.describe(), e);
                Some(e)
            }
        };
        Persisted { value, save_error }
    }

    // ========================================================================
    // MUTATIONS (each followed by a save)
    // ========================================================================

    pub fn add(
        &mut self,
        content: &str,
        category: &str,
        explanation: &str,
        example: &str,
        pronunciation: &str,
    ) -> Result<Persisted<Entry>> {
        let entry = self
            .store
            .add(content, category, explanation, example, pronunciation)?;
        Ok(self.persisted(entry))
    }

    pub fn edit(&mut self, index: usize, update: &EntryUpdate) -> Result<Persisted<Entry>> {
        let entry = self.store.edit(index, update)?;
        Ok(self.persisted(entry))
    }

    pub fn delete(&mut self, index: usize) -> Result<Persisted<Entry>> {
        let entry = self.store.delete(index)?;
        Ok(self.persisted(entry))
    }

    pub fn add_category(&mut self, label: &str) -> Result<Persisted<String>> {
        let label = self.store.add_category(label)?;
        Ok(self.persisted(label))
    }

    pub fn remove_category(&mut self, label: &str) -> Result<Persisted<String>> {
        let label = self.store.remove_category(label)?;
        Ok(self.persisted(label))
    }

    /// Replace everything with an imported snapshot; returns the entry count
    pub fn replace_with(&mut self, snapshot: Snapshot) -> Persisted<usize> {
        self.store = VocabStore::from_snapshot(snapshot);
        info!("Imported {} entries", self.store.len());
        let count = self.store.len();
        self.persisted(count)
    }

    /// Remove all entries and reset categories; returns how many were removed
    pub fn clear(&mut self) -> Persisted<usize> {
        let removed = self.store.len();
        self.store.clear();
        info!("Cleared {} entries", removed);
        self.persisted(removed)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn list_all(&self) -> &[Entry] {
        self.store.list_all()
    }

    pub fn list_by_category(&self, category: &str) -> Result<Vec<&Entry>> {
        self.store.list_by_category(category)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<&Entry>> {
        self.store.search(keyword)
    }

    pub fn list_categories(&self) -> Vec<(String, usize)> {
        self.store.list_categories()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.store.get(index)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{JsonFileStore, MemorySnapshotStore};
    use tempfile::TempDir;

    fn open_memory() -> Library<MemorySnapshotStore> {
        let opened = Library::open(MemorySnapshotStore::new());
        assert!(opened.load_error.is_none());
        opened.library
    }

    #[test]
    fn test_every_mutation_saves() {
        let mut library = open_memory();

        assert!(library.add("for loop", "循环结构", "", "", "").unwrap().is_saved());
        assert!(library
            .edit(0, &EntryUpdate::default().explanation("loops"))
            .unwrap()
            .is_saved());
        assert!(library.add_category("新分类").unwrap().is_saved());
        assert!(library.remove_category("新分类").unwrap().is_saved());
        assert!(library.delete(0).unwrap().is_saved());

        assert_eq!(library.backend().save_count(), 5);
        assert_eq!(library.backend().saved(), Some(library.store().snapshot()));
    }

    #[test]
    fn test_rejected_mutation_does_not_save() {
        let mut library = open_memory();

        assert_eq!(
            library.add("", "循环结构", "", "", "").unwrap_err(),
            VocabError::EmptyField("content")
        );
        assert!(library.delete(0).is_err());
        assert!(library.add_category("循环结构").is_err());
        assert_eq!(library.backend().save_count(), 0);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut library = open_memory();
        library.backend().set_fail_saves(true);

        let outcome = library.add("for loop", "循环结构", "", "", "").unwrap();
        assert!(matches!(
            outcome.save_error,
            Some(VocabError::PersistenceFailed(_))
        ));
        assert_eq!(outcome.value.content, "for loop");
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_corrupt_snapshot_degrades_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab_data.json");
        std::fs::write(&path, "not json at all").unwrap();

        let opened = Library::open(JsonFileStore::new(&path));
        assert!(matches!(
            opened.load_error,
            Some(VocabError::PersistenceFailed(_))
        ));
        assert!(opened.library.is_empty());
        assert_eq!(opened.library.store().category_count(), 8);
    }

    #[test]
    fn test_file_round_trip_reopens_equivalent_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab_data.json");

        let mut library = Library::open(JsonFileStore::new(&path)).library;
        let _ = library.add("for loop", "循环结构", "iterate", "for i in x:", "for");
        let _ = library.add("range()", "内置函数", "sequence", "", "");
        let _ = library.add_category("空");

        let reopened = Library::open(JsonFileStore::new(&path));
        assert!(reopened.load_error.is_none());
        assert_eq!(reopened.library.store(), library.store());
    }

    #[test]
    fn test_open_hydrates_from_existing_snapshot() {
        let snapshot = Snapshot {
            vocab_data: vec![
                Entry::new("for loop", "循环结构", "", "", ""),
                Entry::new("   ", "   ", "", "", ""),
            ],
            categories: vec!["自定义".to_string()],
        };
        let opened = Library::open(MemorySnapshotStore::with_snapshot(snapshot));
        assert!(opened.load_error.is_none());

        let library = opened.library;
        assert_eq!(library.len(), 1);
        assert!(library.store().contains_category("自定义"));
        assert!(!library.store().contains_category("   "));
        assert_eq!(library.backend().save_count(), 0);
    }

    #[test]
    fn test_replace_with_unions_defaults() {
        let mut library = open_memory();
        let snapshot = Snapshot {
            vocab_data: vec![Entry::new("x", "custom", "", "", "")],
            categories: vec![],
        };

        let outcome = library.replace_with(snapshot);
        assert_eq!(outcome.value, 1);
        assert!(library.store().contains_category("custom"));
        assert!(library.store().contains_category("关键字"));
    }

    #[test]
    fn test_clear_resets_and_saves() {
        let mut library = open_memory();
        let _ = library.add("x", "custom", "", "", "");

        let outcome = library.clear();
        assert_eq!(outcome.value, 1);
        assert!(library.is_empty());
        assert!(!library.store().contains_category("custom"));
        assert_eq!(library.backend().saved().unwrap().vocab_data.len(), 0);
    }
}
