// End-to-end walkthrough against a real snapshot file

use code_vocab::{
    EntryUpdate, JsonFileStore, Library, Snapshot, SnapshotStore, VocabError, DEFAULT_CATEGORIES,
};
use tempfile::TempDir;

fn open(path: &std::path::Path) -> Library<JsonFileStore> {
    let opened = Library::open(JsonFileStore::new(path));
    assert!(opened.load_error.is_none());
    opened.library
}

#[test]
fn test_category_lifecycle_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab_data.json");
    let mut library = open(&path);

    assert!(library.is_empty());
    assert_eq!(library.list_categories().len(), DEFAULT_CATEGORIES.len());

    let added = library
        .add("for loop", "循环结构", "...", "for i in range(5): ...", "")
        .unwrap();
    assert!(added.is_saved());
    assert_eq!(library.len(), 1);
    assert_eq!(library.list_by_category("循环结构").unwrap().len(), 1);

    assert_eq!(
        library.add_category("循环结构").unwrap_err(),
        VocabError::AlreadyExists("循环结构".to_string())
    );
    assert_eq!(
        library.remove_category("循环结构").unwrap_err(),
        VocabError::InUse {
            label: "循环结构".to_string(),
            count: 1,
        }
    );

    assert!(library.delete(0).unwrap().is_saved());
    assert_eq!(library.len(), 0);
    assert!(library.remove_category("循环结构").unwrap().is_saved());

    // Removed default comes back on the next load
    let reopened = open(&path);
    assert!(reopened.store().contains_category("循环结构"));
    assert!(reopened.is_empty());
}

#[test]
fn test_edits_survive_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab_data.json");

    {
        let mut library = open(&path);
        let _ = library.add("for loop", "循环结构", "iterate", "", "").unwrap();
        let _ = library.add("while loop", "循环结构", "", "", "").unwrap();
        let _ = library
            .edit(1, &EntryUpdate::default().category("控制流").explanation("repeat"))
            .unwrap();
    }

    let library = open(&path);
    let entries = library.list_all();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].content, "for loop");
    assert_eq!(entries[1].category, "控制流");
    assert_eq!(entries[1].explanation, "repeat");
    assert!(library.store().contains_category("控制流"));
}

#[test]
fn test_hand_written_snapshot_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab_data.json");
    std::fs::write(
        &path,
        r#"{
  "vocab_data": [
    {
      "content": "list 列表",
      "category": "数据类型",
      "explanation": "列表",
      "example": "fruits = []",
      "pronunciation": "list"
    }
  ],
  "categories": ["数据类型", "内置函数"]
}"#,
    )
    .unwrap();

    let library = open(&path);
    assert_eq!(library.len(), 1);
    assert!(library.store().contains_category("内置函数"));
    assert_eq!(library.list_categories().len(), 9);

    let saved = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(saved.vocab_data.len(), 1);
    assert_ne!(saved, Snapshot::default());
}
