//! JSON wrappers over host key-value stores (local and session storage).
//!
//! A [`KeyValueStore`] is the raw string store the host provides: the
//! browser's `localStorage`/`sessionStorage`, an in-memory map, or a JSON
//! file. [`BrowserStorage`] pairs one store per [`StorageArea`] and moves
//! values in and out as JSON text.
//!
//! A lookup that finds nothing yields the empty-string sentinel
//! (`Value::String("")`) instead of an error.

use crate::error::{Result, UtilError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A raw string key-value store.
pub trait KeyValueStore {
    /// Load the text stored under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous text.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Which browser storage area an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let guard = self.items.read().map_err(lock_error)?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.items.write().map_err(lock_error)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut guard = self.items.write().map_err(lock_error)?;
        guard.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object in a single file.
///
/// The file is read once on open and rewritten after every change. A file
/// that cannot be read or parsed is treated as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse storage file {:?}: {}", path, e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read storage file {:?}: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("File storage opened at: {:?}", path);

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    UtilError::Storage(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        let data = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, data)
            .map_err(|e| UtilError::Storage(format!("cannot write {}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let guard = self.cache.read().map_err(lock_error)?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.cache.write().map_err(lock_error)?;
        let previous = guard.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&guard) {
            restore(&mut guard, key, previous);
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut guard = self.cache.write().map_err(lock_error)?;
        let Some(previous) = guard.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&guard) {
            restore(&mut guard, key, Some(previous));
            return Err(e);
        }
        Ok(())
    }
}

/// Put the cache entry for `key` back the way it was before a failed write.
fn restore(items: &mut HashMap<String, String>, key: &str, previous: Option<String>) {
    tracing::warn!("Storage write failed, rolling back key '{}'", key);
    match previous {
        Some(value) => {
            items.insert(key.to_string(), value);
        }
        None => {
            items.remove(key);
        }
    }
}

fn lock_error<T>(e: std::sync::PoisonError<T>) -> UtilError {
    UtilError::Storage(format!("store lock poisoned: {}", e))
}

/// JSON-valued local and session storage over two raw stores.
#[derive(Debug, Default)]
pub struct BrowserStorage<L, S = L> {
    local: L,
    session: S,
}

impl<L: KeyValueStore, S: KeyValueStore> BrowserStorage<L, S> {
    pub fn new(local: L, session: S) -> Self {
        Self { local, session }
    }

    fn store(&self, area: StorageArea) -> &dyn KeyValueStore {
        match area {
            StorageArea::Local => &self.local,
            StorageArea::Session => &self.session,
        }
    }

    /// Serialize `value` to JSON and store it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, area: StorageArea, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        tracing::debug!(?area, key, "storage set");
        self.store(area).set_item(key, &json)
    }

    /// Load and parse the value under `key`.
    ///
    /// Returns `Value::String("")` if the key is absent or holds empty text.
    ///
    /// # Errors
    ///
    /// Returns `UtilError::Json` if the stored text is not valid JSON.
    pub fn get(&self, area: StorageArea, key: &str) -> Result<Value> {
        match self.store(area).get_item(key)? {
            Some(text) if !text.is_empty() => Ok(serde_json::from_str(&text)?),
            _ => {
                tracing::debug!(?area, key, "storage miss");
                Ok(Value::String(String::new()))
            }
        }
    }

    /// Remove `key` from the given area only.
    pub fn remove(&self, area: StorageArea, key: &str) -> Result<()> {
        tracing::debug!(?area, key, "storage remove");
        self.store(area).remove_item(key)
    }

    pub fn set_local<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(StorageArea::Local, key, value)
    }

    pub fn get_local(&self, key: &str) -> Result<Value> {
        self.get(StorageArea::Local, key)
    }

    pub fn remove_local(&self, key: &str) -> Result<()> {
        self.remove(StorageArea::Local, key)
    }

    pub fn set_session<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(StorageArea::Session, key, value)
    }

    pub fn get_session(&self, key: &str) -> Result<Value> {
        self.get(StorageArea::Session, key)
    }

    pub fn remove_session(&self, key: &str) -> Result<()> {
        self.remove(StorageArea::Session, key)
    }

    /// The raw local store.
    pub fn local(&self) -> &L {
        &self.local
    }

    /// The raw session store.
    pub fn session(&self) -> &S {
        &self.session
    }
}
