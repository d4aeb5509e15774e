//! Local/session storage wrappers over memory and file stores.
use browser_utils::{BrowserStorage, FileStore, KeyValueStore, MemoryStore, StorageArea, UtilError};
use serde::Serialize;
use serde_json::{json, Value};

fn memory_storage() -> BrowserStorage<MemoryStore> {
    BrowserStorage::new(MemoryStore::new(), MemoryStore::new())
}

// ============================================================================
// 1. Set / get
// ============================================================================

#[test]
fn set_then_get_roundtrips_json_values() {
    let storage = memory_storage();
    storage.set_local("user", &json!({"name": "Alice", "tags": [1, 2]})).unwrap();
    storage.set_session("count", &7).unwrap();

    assert_eq!(
        storage.get_local("user").unwrap(),
        json!({"name": "Alice", "tags": [1, 2]})
    );
    assert_eq!(storage.get_session("count").unwrap(), json!(7));
}

#[test]
fn values_are_stored_as_json_text() {
    let storage = memory_storage();
    storage.set_local("greeting", "hi").unwrap();
    assert_eq!(
        storage.local().get_item("greeting").unwrap().as_deref(),
        Some("\"hi\"")
    );
}

#[test]
fn serializable_structs_are_accepted() {
    #[derive(Serialize)]
    struct Prefs {
        theme: &'static str,
        font_size: u8,
    }

    let storage = memory_storage();
    storage
        .set(StorageArea::Local, "prefs", &Prefs { theme: "dark", font_size: 14 })
        .unwrap();
    assert_eq!(
        storage.get(StorageArea::Local, "prefs").unwrap(),
        json!({"theme": "dark", "font_size": 14})
    );
}

#[test]
fn areas_are_independent() {
    let storage = memory_storage();
    storage.set_local("k", &"local").unwrap();
    storage.set_session("k", &"session").unwrap();

    assert_eq!(storage.get_local("k").unwrap(), json!("local"));
    assert_eq!(storage.get_session("k").unwrap(), json!("session"));
}

// ============================================================================
// 2. Miss sentinel and errors
// ============================================================================

#[test]
fn missing_key_yields_empty_string_sentinel() {
    let storage = memory_storage();
    assert_eq!(storage.get_local("nope").unwrap(), Value::String(String::new()));
    assert_eq!(storage.get_session("nope").unwrap(), json!(""));
}

#[test]
fn empty_stored_text_yields_sentinel() {
    let storage = memory_storage();
    storage.session().set_item("blank", "").unwrap();
    assert_eq!(storage.get_session("blank").unwrap(), json!(""));
}

#[test]
fn non_json_stored_text_is_an_error() {
    let storage = memory_storage();
    storage.local().set_item("raw", "not json").unwrap();
    assert!(matches!(storage.get_local("raw"), Err(UtilError::Json(_))));
}

// ============================================================================
// 3. Remove
// ============================================================================

#[test]
fn remove_local_targets_local_store_only() {
    let storage = memory_storage();
    storage.set_local("token", &"abc").unwrap();
    storage.set_session("token", &"xyz").unwrap();

    storage.remove_local("token").unwrap();

    assert_eq!(storage.get_local("token").unwrap(), json!(""));
    assert_eq!(storage.get_session("token").unwrap(), json!("xyz"));
}

#[test]
fn remove_session_targets_session_store_only() {
    let storage = memory_storage();
    storage.set_local("token", &"abc").unwrap();
    storage.set_session("token", &"xyz").unwrap();

    storage.remove_session("token").unwrap();

    assert_eq!(storage.get_local("token").unwrap(), json!("abc"));
    assert_eq!(storage.get_session("token").unwrap(), json!(""));
    assert_eq!(storage.session().len(), 0);
}

#[test]
fn removing_missing_key_is_ok() {
    let storage = memory_storage();
    assert!(storage.remove_local("ghost").is_ok());
}

// ============================================================================
// 4. File store
// ============================================================================

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let store = FileStore::open(&path);
        store.set_item("a", "1").unwrap();
        store.set_item("b", "[true]").unwrap();
        store.remove_item("a").unwrap();
    }

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get_item("a").unwrap(), None);
    assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some("[true]"));
}

#[test]
fn corrupt_store_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{{{ garbage").unwrap();

    let store = FileStore::open(&path);
    assert_eq!(store.get_item("anything").unwrap(), None);
}

#[test]
fn file_store_backs_browser_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage = BrowserStorage::new(
        FileStore::open(dir.path().join("local.json")),
        FileStore::open(dir.path().join("session.json")),
    );
    storage.set_local("cart", &json!([{"sku": "x1", "qty": 2}])).unwrap();

    let reopened = FileStore::open(dir.path().join("local.json"));
    assert_eq!(
        reopened.get_item("cart").unwrap().as_deref(),
        Some(r#"[{"sku":"x1","qty":2}]"#)
    );
}

#[test]
fn failed_write_leaves_cache_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the store file should be makes every write fail.
    let store = FileStore::open(dir.path());

    let err = store.set_item("k", "1").unwrap_err();
    assert!(matches!(err, UtilError::Storage(_)));
    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn failed_write_restores_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path);
    store.set_item("k", "old").unwrap();

    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(store.set_item("k", "new").is_err());
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("old"));

    assert!(store.remove_item("k").is_err());
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("old"));
}
