use chrono::{Duration, Utc};
use std::fs;
use tempfile::TempDir;
use todoz::error::TodosError;
use todoz::model::{StatusFilter, TodoStatus};
use todoz::store::fs::{FileStorage, EMPTY_COLLECTION};
use todoz::store::Storage;
use todoz::todos::Todos;

fn setup() -> (TempDir, FileStorage) {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path(), "todos.yaml").unwrap();
    (dir, storage)
}

#[test]
fn test_missing_file_reads_as_empty_collection() {
    let (dir, storage) = setup();
    assert_eq!(storage.read().unwrap(), EMPTY_COLLECTION);
    assert!(!dir.path().join("todos.yaml").exists());
}

#[test]
fn test_creates_base_dir_recursively() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("a").join("b").join("c");

    let storage = FileStorage::new(&base, "todos.yaml").unwrap();
    assert!(base.is_dir());
    assert_eq!(storage.path(), base.join("todos.yaml"));
}

#[test]
fn test_write_then_read() {
    let (_dir, mut storage) = setup();
    storage.write("- id: 1\n  description: hi\n").unwrap();
    assert_eq!(storage.read().unwrap(), "- id: 1\n  description: hi\n");

    storage.write("[]\n").unwrap();
    assert_eq!(storage.read().unwrap(), "[]\n");
}

#[test]
fn test_atomic_write_leaves_no_tmp_files() {
    let (dir, mut storage) = setup();
    storage.write("[]\n").unwrap();
    storage.write("[]\n").unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_read_failure_names_the_path() {
    let dir = TempDir::new().unwrap();
    // A directory where the data file should be makes reading fail.
    fs::create_dir(dir.path().join("todos.yaml")).unwrap();
    let storage = FileStorage::new(dir.path(), "todos.yaml").unwrap();

    match storage.read() {
        Err(TodosError::Io { path, .. }) => assert_eq!(path, dir.path().join("todos.yaml")),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_unreadable_data_propagates_through_manager() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("todos.yaml")).unwrap();
    let mut todos = Todos::new(FileStorage::new(dir.path(), "todos.yaml").unwrap());
    assert!(matches!(todos.find(1), Err(TodosError::Io { .. })));
}

#[test]
fn test_find_on_fresh_directory_is_not_found() {
    let (_dir, storage) = setup();
    let mut todos = Todos::new(storage);
    assert!(matches!(todos.find(1), Err(TodosError::NotFound(1))));
}

#[test]
fn test_collection_survives_restart() {
    let dir = TempDir::new().unwrap();
    let due = Utc::now() + Duration::days(2);

    let before = {
        let mut todos = Todos::new(FileStorage::new(dir.path(), "todos.yaml").unwrap());
        todos.create("write report", Some(due)).unwrap();
        todos.create("call mom", None).unwrap();
        todos.create("water plants", None).unwrap();
        todos.mark_done(2).unwrap();
        todos.destroy(3).unwrap();
        todos.list(StatusFilter::All).unwrap()
    };

    let mut reopened = Todos::new(FileStorage::new(dir.path(), "todos.yaml").unwrap());
    let after = reopened.list(StatusFilter::All).unwrap();
    assert_eq!(after, before);
    assert_eq!(after[0].due(), Some(due));
    assert_eq!(after[1].status(), TodoStatus::Done);
    assert_eq!(after[1].due(), None);

    // Ids keep counting from the persisted maximum.
    assert_eq!(reopened.create("new", None).unwrap().id(), 3);
}

#[test]
fn test_cleared_collection_is_stored_as_empty_sequence() {
    let dir = TempDir::new().unwrap();
    let mut todos = Todos::new(FileStorage::new(dir.path(), "todos.yaml").unwrap());
    todos.create("a", None).unwrap();
    todos.clear(None).unwrap();

    let on_disk = fs::read_to_string(dir.path().join("todos.yaml")).unwrap();
    assert_eq!(on_disk.trim(), "[]");
}

#[test]
fn test_reads_hand_written_legacy_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("todos.yaml"),
        "- id: 2\n  description: from an older version\n\
         - id: 7\n  description: done one\n  status: done\n",
    )
    .unwrap();

    let mut todos = Todos::new(FileStorage::new(dir.path(), "todos.yaml").unwrap());
    let pending = todos.list(StatusFilter::Pending).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id(), 2);
    assert_eq!(todos.create("next", None).unwrap().id(), 8);
}
