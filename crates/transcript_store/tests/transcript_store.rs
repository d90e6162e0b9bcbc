use std::fs;
use std::path::Path;

use chat_provider::Message;
use serde_json::json;
use tempfile::TempDir;
use transcript_store::{TranscriptStore, TranscriptStoreError};

fn store_in_tempdir() -> (TempDir, TranscriptStore) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = TranscriptStore::new(dir.path().join("conversations"));
    (dir, store)
}

fn sample_messages() -> Vec<Message> {
    vec![
        Message::assistant("Hello! How can I help you shop today?"),
        Message::user("where is my order"),
        Message::assistant("Let me check on that for you."),
    ]
}

fn write_record_file(root: &Path, file_name: &str, timestamp: &str, title: &str) {
    fs::create_dir_all(root).expect("transcript directory should be created");
    let body = json!({
        "timestamp": timestamp,
        "title": title,
        "messages": [
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello"}
        ],
        "created": "2026-02-14T00:00:00Z",
    });
    fs::write(
        root.join(file_name),
        serde_json::to_string_pretty(&body).expect("record should serialize"),
    )
    .expect("record file should be written");
}

#[test]
fn save_then_load_round_trips_ordered_messages() {
    let (_dir, store) = store_in_tempdir();
    let messages = sample_messages();

    let id = store
        .save(&messages, Some("order check"))
        .expect("save should succeed");
    let record = store.load(&id).expect("load should succeed");

    assert_eq!(record.title, "order check");
    assert_eq!(record.messages, messages);
}

#[test]
fn save_creates_storage_directory_on_first_use() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let root = dir.path().join("conversations");
    assert!(!root.exists());

    let store = TranscriptStore::new(&root);
    store
        .save(&sample_messages(), None)
        .expect("save should succeed");

    assert!(root.is_dir());
}

#[test]
fn save_derives_title_from_first_user_message() {
    let (_dir, store) = store_in_tempdir();
    let messages = vec![
        Message::assistant("Hello! How can I help you shop today?"),
        Message::user("compare these two laptops for me please and thanks"),
    ];

    let id = store.save(&messages, None).expect("save should succeed");
    let record = store.load(&id).expect("load should succeed");

    assert_eq!(record.title, "compare these two laptops for ...");
    assert!(id.ends_with("_compare_these_two_laptops_for_....json"));
}

#[test]
fn save_returns_distinct_ids_within_the_same_second() {
    let (_dir, store) = store_in_tempdir();
    let messages = sample_messages();

    let ids: Vec<String> = (0..3)
        .map(|_| {
            store
                .save(&messages, Some("same title"))
                .expect("save should succeed")
        })
        .collect();

    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);
    for id in &ids {
        store.load(id).expect("each saved record should load");
    }
}

#[test]
fn list_returns_summaries_newest_first() {
    let (_dir, store) = store_in_tempdir();
    write_record_file(
        store.root(),
        "20260101_000000_older....json",
        "20260101_000000",
        "older...",
    );
    write_record_file(
        store.root(),
        "20260214_153000_newer....json",
        "20260214_153000",
        "newer...",
    );

    let summaries = store.list().expect("list should succeed");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "newer...");
    assert_eq!(summaries[0].id, "20260214_153000_newer....json");
    assert_eq!(summaries[1].title, "older...");
}

#[test]
fn list_is_empty_when_directory_does_not_exist() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = TranscriptStore::new(dir.path().join("conversations"));

    let summaries = store.list().expect("list should succeed");
    assert!(summaries.is_empty());
}

#[test]
fn list_skips_non_json_files() {
    let (_dir, store) = store_in_tempdir();
    write_record_file(
        store.root(),
        "20260101_000000_kept....json",
        "20260101_000000",
        "kept...",
    );
    fs::write(store.root().join("notes.txt"), "not a record")
        .expect("stray file should be written");

    let summaries = store.list().expect("list should succeed");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "kept...");
}

#[test]
fn list_aborts_on_malformed_record_file() {
    let (_dir, store) = store_in_tempdir();
    fs::create_dir_all(store.root()).expect("transcript directory should be created");
    fs::write(store.root().join("broken.json"), "{ this is not json")
        .expect("malformed file should be written");

    let error = store.list().expect_err("malformed record must abort listing");
    assert!(matches!(error, TranscriptStoreError::Parse { .. }));
}

#[test]
fn load_unknown_id_is_not_found() {
    let (_dir, store) = store_in_tempdir();

    let error = store
        .load("20260101_000000_missing....json")
        .expect_err("unknown id must fail");
    assert!(matches!(error, TranscriptStoreError::NotFound { .. }));
}

#[test]
fn delete_then_load_is_not_found() {
    let (_dir, store) = store_in_tempdir();
    let id = store
        .save(&sample_messages(), None)
        .expect("save should succeed");

    store.delete(&id).expect("delete should succeed");

    let error = store.load(&id).expect_err("deleted record must not load");
    assert!(matches!(error, TranscriptStoreError::NotFound { .. }));
}

#[test]
fn path_like_ids_cannot_reach_outside_the_store_root() {
    let (dir, store) = store_in_tempdir();
    fs::create_dir_all(store.root()).expect("transcript directory should be created");
    let outside = dir.path().join("outside.json");
    fs::write(&outside, "{}").expect("outside file should be written");

    let error = store
        .load("../outside.json")
        .expect_err("path-like id must not load");
    assert!(matches!(error, TranscriptStoreError::NotFound { .. }));

    let error = store
        .delete("../outside.json")
        .expect_err("path-like id must not delete");
    assert!(matches!(error, TranscriptStoreError::NotFound { .. }));
    assert!(outside.exists(), "file outside the store root must survive");
}

#[test]
fn delete_unknown_id_is_not_found() {
    let (_dir, store) = store_in_tempdir();

    let error = store
        .delete("20260101_000000_missing....json")
        .expect_err("unknown id must fail");
    assert!(matches!(error, TranscriptStoreError::NotFound { .. }));
}
