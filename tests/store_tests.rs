//! Integration tests for the typed document store.

use std::collections::BTreeSet;
use std::fs;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use pwm::errors::PwmError;
use pwm::store::{Document, DocumentStore};

/// A toy record type with its own schema tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    body: String,
    pinned: bool,
}

impl Document for Note {
    const SCHEMA: &'static str = "pwm.test-notes.v1";
}

/// A second record type, used to prove schema isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Task {
    title: String,
    done: bool,
}

impl Document for Task {
    const SCHEMA: &'static str = "pwm.test-tasks.v1";
}

fn note(body: &str) -> Note {
    Note {
        body: body.to_string(),
        pinned: false,
    }
}

/// Helper: a store path inside a fresh temp dir.
fn store_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("notes.json");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Open / init
// ---------------------------------------------------------------------------

#[test]
fn open_creates_the_file_immediately() {
    let (_dir, path) = store_path();
    assert!(!path.exists());

    let store = DocumentStore::<Note>::open(&path).expect("open");
    assert!(path.exists(), "file must exist after first open");
    assert!(store.is_empty());

    // The empty file must carry the schema tag already.
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains(Note::SCHEMA));
}

#[test]
fn reopen_loads_persisted_records() {
    let (_dir, path) = store_path();

    let mut store = DocumentStore::<Note>::open(&path).unwrap();
    store.insert("shopping", note("milk, eggs")).unwrap();
    store.insert("ideas", note("write more tests")).unwrap();

    let store2 = DocumentStore::<Note>::open(&path).expect("reopen");
    assert_eq!(store2.len(), 2);
    assert_eq!(store2.get("shopping").unwrap().body, "milk, eggs");
    assert_eq!(store2.get("ideas").unwrap().body, "write more tests");
}

// ---------------------------------------------------------------------------
// Insert / get / remove
// ---------------------------------------------------------------------------

#[test]
fn insert_then_get_returns_the_record() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    let n = note("hello");
    store.insert("greeting", n.clone()).unwrap();

    assert_eq!(store.get("greeting").unwrap(), &n);
    assert_eq!(store.len(), 1);
}

#[test]
fn get_missing_record_is_not_found() {
    let (_dir, path) = store_path();
    let store = DocumentStore::<Note>::open(&path).unwrap();

    let result = store.get("nope");
    assert!(matches!(result, Err(PwmError::NotFound(_))));
}

#[test]
fn insert_duplicate_fails_and_leaves_the_original() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    store.insert("key", note("original")).unwrap();
    let result = store.insert("key", note("usurper"));

    assert!(matches!(result, Err(PwmError::AlreadyExists(_))));
    assert_eq!(store.get("key").unwrap().body, "original");

    // The file on disk must also still hold the original.
    let reloaded = DocumentStore::<Note>::open(&path).unwrap();
    assert_eq!(reloaded.get("key").unwrap().body, "original");
}

#[test]
fn remove_then_get_is_not_found() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    store.insert("gone-soon", note("bye")).unwrap();
    store.remove("gone-soon").unwrap();

    assert!(matches!(
        store.get("gone-soon"),
        Err(PwmError::NotFound(_))
    ));

    // Removal is persisted.
    let reloaded = DocumentStore::<Note>::open(&path).unwrap();
    assert!(!reloaded.contains("gone-soon"));
}

#[test]
fn remove_missing_record_is_not_found() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    let result = store.remove("never-existed");
    assert!(matches!(result, Err(PwmError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// drop_all
// ---------------------------------------------------------------------------

#[test]
fn drop_all_twice_is_idempotent() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    store.insert("a", note("1")).unwrap();
    store.insert("b", note("2")).unwrap();

    store.drop_all().unwrap();
    assert!(store.is_empty());

    // A second drop on an already-empty store is fine.
    store.drop_all().unwrap();
    assert!(store.is_empty());

    let reloaded = DocumentStore::<Note>::open(&path).unwrap();
    assert!(reloaded.is_empty());
}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

#[test]
fn iter_yields_every_record_exactly_once() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();

    store.insert("zebra", note("z")).unwrap();
    store.insert("apple", note("a")).unwrap();
    store.insert("mango", note("m")).unwrap();

    // Compare as a set — ordering is a serialization artifact.
    let names: BTreeSet<String> = store.iter().map(|(name, _)| name.clone()).collect();
    let expected: BTreeSet<String> = ["zebra", "apple", "mango"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, expected);

    // The iterator is restartable.
    assert_eq!(store.iter().count(), 3);
    assert_eq!(store.iter().count(), 3);
}

// ---------------------------------------------------------------------------
// Schema isolation and corruption
// ---------------------------------------------------------------------------

#[test]
fn opening_with_the_wrong_schema_fails() {
    let (_dir, path) = store_path();

    let mut notes = DocumentStore::<Note>::open(&path).unwrap();
    notes.insert("a", note("not a task")).unwrap();

    let err = DocumentStore::<Task>::open(&path)
        .err()
        .expect("opening with the wrong schema must fail");
    match err {
        PwmError::SchemaMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, Task::SCHEMA);
            assert_eq!(found, Note::SCHEMA);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn garbage_file_is_invalid_format_not_a_panic() {
    let (_dir, path) = store_path();
    fs::write(&path, "this is not json").unwrap();

    let result = DocumentStore::<Note>::open(&path);
    assert!(matches!(
        result,
        Err(PwmError::InvalidStoreFormat { .. })
    ));
}

#[test]
fn missing_schema_tag_is_invalid_format() {
    let (_dir, path) = store_path();
    fs::write(&path, r#"{"records": {}}"#).unwrap();

    let result = DocumentStore::<Note>::open(&path);
    assert!(matches!(
        result,
        Err(PwmError::InvalidStoreFormat { .. })
    ));
}

// ---------------------------------------------------------------------------
// Deterministic serialization
// ---------------------------------------------------------------------------

#[test]
fn same_contents_serialize_to_identical_bytes() {
    let dir = TempDir::new().unwrap();
    let path1 = dir.path().join("one.json");
    let path2 = dir.path().join("two.json");

    // Insert in different orders.
    let mut store1 = DocumentStore::<Note>::open(&path1).unwrap();
    store1.insert("b", note("2")).unwrap();
    store1.insert("a", note("1")).unwrap();

    let mut store2 = DocumentStore::<Note>::open(&path2).unwrap();
    store2.insert("a", note("1")).unwrap();
    store2.insert("b", note("2")).unwrap();

    let bytes1 = fs::read(&path1).unwrap();
    let bytes2 = fs::read(&path2).unwrap();
    assert_eq!(bytes1, bytes2, "key-sorted output must be reproducible");
}

#[test]
fn no_temp_file_left_behind_after_save() {
    let (_dir, path) = store_path();
    let mut store = DocumentStore::<Note>::open(&path).unwrap();
    store.insert("a", note("1")).unwrap();

    let parent = path.parent().unwrap();
    let leftovers: Vec<_> = fs::read_dir(parent)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files must be renamed away");
}
