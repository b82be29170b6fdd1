//! Key-value persistence for the profile and shop content.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SessionResult;

/// Key holding the player profile.
pub const PROFILE_KEY: &str = "nanti.profile";
/// Key holding item definitions added through the content store.
pub const SHOP_ITEMS_KEY: &str = "nanti.shop.items";

/// A string-valued key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write `value` under `key`, replacing what was there.
    fn set(&mut self, key: &str, value: &str) -> SessionResult<()>;
}

/// Read and decode a JSON value.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> SessionResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> SessionResult<()> {
    let raw = serde_json::to_string_pretty(value)?;
    store.set(key, &raw)
}

/// One `<key>.json` file per key in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        tracing::debug!(key, dir = %self.dir.display(), "stored value");
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
