// 📚 Vocabulary Store - ordered entries + category set
//
// Invariant: every entry's category is a member of the category set.
// add, edit and remove_category each preserve it on their own; removing a
// category that is still referenced is refused rather than cascaded.

use crate::entry::{Entry, EntryUpdate};
use crate::error::{Result, VocabError};
use crate::persistence::Snapshot;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Baseline categories seeded into every store
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "关键字",
    "数据类型",
    "循环结构",
    "函数与类",
    "文件操作",
    "异常处理",
    "模块导入",
    "数据结构",
];

// ============================================================================
// VOCABULARY STORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabStore {
    entries: Vec<Entry>,
    categories: BTreeSet<String>,
}

impl VocabStore {
    /// Create an empty store holding only the default categories
    pub fn new() -> Self {
        VocabStore {
            entries: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Hydrate from a snapshot, unioning the defaults back in
    ///
    /// Entries get the same trimming as `add`; ones left with a blank content
    /// or category are skipped. Categories referenced by entries but missing
    /// from the snapshot's category list are added as well, so a hand-edited
    /// file cannot break the invariant.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = VocabStore::new();
        store.categories.extend(
            snapshot
                .categories
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        );

        let total = snapshot.vocab_data.len();
        for entry in snapshot.vocab_data {
            let Some(entry) = normalized(entry) else {
                continue;
            };
            if !store.categories.contains(&entry.category) {
                debug!("Snapshot entry references unlisted category {:?}", entry.category);
                store.categories.insert(entry.category.clone());
            }
            store.entries.push(entry);
        }

        let skipped = total - store.entries.len();
        if skipped > 0 {
            warn!("Skipped {} snapshot entries with blank content or category", skipped);
        }
        store
    }

    /// Full snapshot of the current state (categories sorted)
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vocab_data: self.entries.clone(),
            categories: self.categories.iter().cloned().collect(),
        }
    }

    // ========================================================================
    // ENTRIES
    // ========================================================================

    /// Append a new entry, adding its category to the set if absent
    pub fn add(
        &mut self,
        content: &str,
        category: &str,
        explanation: &str,
        example: &str,
        pronunciation: &str,
    ) -> Result<Entry> {
        let content = content.trim();
        if content.is_empty() {
            return Err(VocabError::EmptyField("content"));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(VocabError::EmptyField("category"));
        }

        let entry = Entry::new(
            content,
            category,
            explanation.trim(),
            example.trim(),
            pronunciation.trim(),
        );
        self.categories.insert(entry.category.clone());
        self.entries.push(entry.clone());

        info!("Added entry {:?} under {:?}", entry.content, entry.category);
        Ok(entry)
    }

    /// All entries in insertion order
    pub fn list_all(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries whose category equals `category`, in store order
    pub fn list_by_category(&self, category: &str) -> Result<Vec<&Entry>> {
        let category = category.trim();
        if !self.categories.contains(category) {
            return Err(VocabError::UnknownCategory(category.to_string()));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| e.category == category)
            .collect())
    }

    /// Case-insensitive substring search over content and explanation
    pub fn search(&self, keyword: &str) -> Result<Vec<&Entry>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(VocabError::EmptyField("keyword"));
        }
        let needle = keyword.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|e| e.matches_keyword(&needle))
            .collect())
    }

    /// Apply non-blank fields of `update` to the entry at `index`
    pub fn edit(&mut self, index: usize, update: &EntryUpdate) -> Result<Entry> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(VocabError::OutOfRange { index, len })?;

        update.apply_to(entry);
        if let Some(category) = update.new_category() {
            self.categories.insert(category.to_string());
        }

        let edited = entry.clone();
        info!("Edited entry #{} ({:?})", index, edited.content);
        Ok(edited)
    }

    /// Remove the entry at `index`; later entries shift down by one
    ///
    /// The category set is left alone even if this was the last entry
    /// referencing its category.
    pub fn delete(&mut self, index: usize) -> Result<Entry> {
        if index >= self.entries.len() {
            return Err(VocabError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        info!("Deleted entry #{} ({:?})", index, removed.content);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset categories to the defaults
    pub fn clear(&mut self) {
        *self = VocabStore::new();
    }

    // ========================================================================
    // CATEGORIES
    // ========================================================================

    /// Sorted category labels
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn contains_category(&self, label: &str) -> bool {
        self.categories.contains(label)
    }

    /// Number of entries currently referencing `label`
    pub fn count_in_category(&self, label: &str) -> usize {
        self.entries.iter().filter(|e| e.category == label).count()
    }

    /// (label, entry_count) sorted by label, zero counts included
    pub fn list_categories(&self) -> Vec<(String, usize)> {
        self.categories
            .iter()
            .map(|label| (label.clone(), self.count_in_category(label)))
            .collect()
    }

    pub fn add_category(&mut self, label: &str) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(VocabError::EmptyField("category name"));
        }
        if !self.categories.insert(label.to_string()) {
            return Err(VocabError::AlreadyExists(label.to_string()));
        }
        info!("Added category {:?}", label);
        Ok(label.to_string())
    }

    /// Remove an unreferenced category; never cascades onto entries
    pub fn remove_category(&mut self, label: &str) -> Result<String> {
        let label = label.trim();
        if !self.categories.contains(label) {
            return Err(VocabError::NotFound(label.to_string()));
        }
        let count = self.count_in_category(label);
        if count > 0 {
            return Err(VocabError::InUse {
                label: label.to_string(),
                count,
            });
        }
        self.categories.remove(label);
        info!("Removed category {:?}", label);
        Ok(label.to_string())
    }
}

impl Default for VocabStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim every field; `None` when content or category ends up blank
fn normalized(entry: Entry) -> Option<Entry> {
    let content = entry.content.trim();
    let category = entry.category.trim();
    if content.is_empty() || category.is_empty() {
        return None;
    }
    Some(Entry::new(
        content,
        category,
        entry.explanation.trim(),
        entry.example.trim(),
        entry.pronunciation.trim(),
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &str, &str)]) -> VocabStore {
        let mut store = VocabStore::new();
        for (content, category, explanation) in entries {
            store.add(content, category, explanation, "", "").unwrap();
        }
        store
    }

    fn assert_invariant(store: &VocabStore) {
        for entry in store.list_all() {
            assert!(
                store.contains_category(&entry.category),
                "entry {:?} references missing category",
                entry.content
            );
        }
    }

    #[test]
    fn test_new_store_has_defaults() {
        let store = VocabStore::new();
        assert!(store.is_empty());
        assert_eq!(store.category_count(), 8);
        for label in DEFAULT_CATEGORIES {
            assert!(store.contains_category(label));
        }
    }

    #[test]
    fn test_add_appends_and_unions_category() {
        let mut store = VocabStore::new();
        let entry = store
            .add("range()", "内置函数", "number sequence", "range(5)", "range")
            .unwrap();

        assert_eq!(entry.content, "range()");
        assert_eq!(store.len(), 1);
        assert!(store.contains_category("内置函数"));
        assert_eq!(store.category_count(), 9);
        assert_invariant(&store);
    }

    #[test]
    fn test_add_existing_category_is_idempotent() {
        let mut store = VocabStore::new();
        store.add("for loop", "循环结构", "", "", "").unwrap();
        assert_eq!(store.category_count(), 8);
    }

    #[test]
    fn test_add_rejects_blank_content_or_category() {
        let mut store = VocabStore::new();
        let before = store.clone();

        assert_eq!(
            store.add("   ", "循环结构", "", "", ""),
            Err(VocabError::EmptyField("content"))
        );
        assert_eq!(
            store.add("for loop", "  ", "", "", ""),
            Err(VocabError::EmptyField("category"))
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_list_by_category_preserves_order() {
        let store = store_with(&[
            ("for loop", "循环结构", ""),
            ("str", "数据类型", ""),
            ("while loop", "循环结构", ""),
        ]);

        let loops: Vec<&str> = store
            .list_by_category("循环结构")
            .unwrap()
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(loops, vec!["for loop", "while loop"]);

        let expected: Vec<&Entry> = store
            .list_all()
            .iter()
            .filter(|e| e.category == "循环结构")
            .collect();
        assert_eq!(store.list_by_category("循环结构").unwrap(), expected);
    }

    #[test]
    fn test_list_by_category_empty_and_unknown() {
        let store = VocabStore::new();
        assert!(store.list_by_category("数据结构").unwrap().is_empty());
        assert_eq!(
            store.list_by_category("nope"),
            Err(VocabError::UnknownCategory("nope".to_string()))
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = store_with(&[
            ("for loop", "循环结构", "iterates"),
            ("dict", "数据类型", "key/value, FOR lookups"),
            ("class", "函数与类", "blueprint"),
        ]);

        let upper = store.search("FOR").unwrap();
        let lower = store.search("for").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
        assert_eq!(upper[0].content, "for loop");
        assert_eq!(upper[1].content, "dict");
    }

    #[test]
    fn test_search_rejects_blank_keyword() {
        let store = VocabStore::new();
        assert_eq!(store.search("  "), Err(VocabError::EmptyField("keyword")));
    }

    #[test]
    fn test_edit_blank_means_keep() {
        let mut store = store_with(&[("for loop", "循环结构", "iterates")]);

        let kept = store.edit(0, &EntryUpdate::default().content("")).unwrap();
        assert_eq!(kept.content, "for loop");

        let replaced = store.edit(0, &EntryUpdate::default().content("new")).unwrap();
        assert_eq!(replaced.content, "new");
        assert_eq!(store.get(0).unwrap().content, "new");
        assert_eq!(store.get(0).unwrap().explanation, "iterates");
    }

    #[test]
    fn test_edit_new_category_is_added() {
        let mut store = store_with(&[("for loop", "循环结构", "")]);
        store
            .edit(0, &EntryUpdate::default().category(" 控制流 "))
            .unwrap();

        assert_eq!(store.get(0).unwrap().category, "控制流");
        assert!(store.contains_category("控制流"));
        assert_invariant(&store);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut store = store_with(&[("for loop", "循环结构", "")]);
        assert_eq!(
            store.edit(1, &EntryUpdate::default().content("x")),
            Err(VocabError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut store = store_with(&[
            ("a", "关键字", ""),
            ("b", "关键字", ""),
            ("c", "关键字", ""),
        ]);

        assert_eq!(store.delete(1).unwrap().content, "b");
        assert_eq!(store.delete(1).unwrap().content, "c");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.delete(1),
            Err(VocabError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_delete_keeps_category() {
        let mut store = store_with(&[("range()", "内置函数", "")]);
        store.delete(0).unwrap();
        assert!(store.contains_category("内置函数"));
    }

    #[test]
    fn test_list_categories_sorted_with_counts() {
        let store = store_with(&[
            ("for loop", "循环结构", ""),
            ("while loop", "循环结构", ""),
            ("zip", "zzz", ""),
        ]);

        let listed = store.list_categories();
        assert_eq!(listed.len(), 9);

        let labels: Vec<&str> = listed.iter().map(|(l, _)| l.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);

        let counts: std::collections::HashMap<_, _> = listed.into_iter().collect();
        assert_eq!(counts["循环结构"], 2);
        assert_eq!(counts["zzz"], 1);
        assert_eq!(counts["数据结构"], 0);
    }

    #[test]
    fn test_add_category_rules() {
        let mut store = VocabStore::new();
        assert_eq!(store.add_category("  Traits "), Ok("Traits".to_string()));
        assert_eq!(
            store.add_category("Traits"),
            Err(VocabError::AlreadyExists("Traits".to_string()))
        );
        // exact match only
        assert!(store.add_category("traits").is_ok());
        assert_eq!(
            store.add_category(" "),
            Err(VocabError::EmptyField("category name"))
        );
    }

    #[test]
    fn test_remove_category_in_use_reports_live_count() {
        let mut store = store_with(&[
            ("for loop", "循环结构", ""),
            ("while loop", "循环结构", ""),
        ]);
        let before = store.clone();
        let live = store.list_by_category("循环结构").unwrap().len();

        assert_eq!(
            store.remove_category("循环结构"),
            Err(VocabError::InUse {
                label: "循环结构".to_string(),
                count: live,
            })
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_category_not_found() {
        let mut store = VocabStore::new();
        assert_eq!(
            store.remove_category("missing"),
            Err(VocabError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_scenario_walkthrough() {
        let mut store = VocabStore::new();
        assert_eq!(store.category_count(), 8);

        store
            .add("for loop", "循环结构", "...", "for i in range(5): ...", "")
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_by_category("循环结构").unwrap().len(), 1);
        assert_eq!(
            store.add_category("循环结构"),
            Err(VocabError::AlreadyExists("循环结构".to_string()))
        );
        assert_eq!(
            store.remove_category("循环结构"),
            Err(VocabError::InUse {
                label: "循环结构".to_string(),
                count: 1,
            })
        );

        store.delete(0).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.remove_category("循环结构").is_ok());
        assert!(!store.contains_category("循环结构"));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = store_with(&[("for loop", "循环结构", ""), ("x", "自定义", "")]);
        store.add_category("空分类").unwrap();

        let restored = VocabStore::from_snapshot(store.snapshot());
        assert_eq!(restored, store);
    }

    #[test]
    fn test_from_snapshot_repairs_categories() {
        let snapshot = Snapshot {
            vocab_data: vec![Entry::new("x", "orphan", "", "", "")],
            categories: vec!["extra".to_string()],
        };
        let store = VocabStore::from_snapshot(snapshot);

        assert!(store.contains_category("orphan"));
        assert!(store.contains_category("extra"));
        assert_eq!(store.category_count(), 10);
        assert_invariant(&store);
    }

    #[test]
    fn test_from_snapshot_trims_and_skips_blank_entries() {
        let snapshot = Snapshot {
            vocab_data: vec![
                Entry::new("", "   ", "", "", ""),
                Entry::new("  ", "关键字", "", "", ""),
                Entry::new("orphan", "  ", "", "", ""),
                Entry::new(" if ", " 关键字 ", " branch ", "", ""),
            ],
            categories: vec![],
        };
        let mut store = VocabStore::from_snapshot(snapshot);

        assert_eq!(store.len(), 1);
        assert_eq!(store.list_all()[0], Entry::new("if", "关键字", "branch", "", ""));
        assert!(!store.contains_category("   "));
        assert!(!store.contains_category(" 关键字 "));
        assert_eq!(store.category_count(), 8);
        assert!(store.categories().all(|label| !label.trim().is_empty()));
        assert_eq!(store.list_by_category("关键字").unwrap().len(), 1);
        assert_invariant(&store);

        store.delete(0).unwrap();
        assert!(store.remove_category("关键字").is_ok());
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let mut store = store_with(&[("x", "custom", "")]);
        store.clear();
        assert_eq!(store, VocabStore::new());
    }
}
