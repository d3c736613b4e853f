//! Key-value persistence.
//!
//! The game treats the browser's `localStorage` as its database. Every
//! account's save lives under `game_<email>`, so the leaderboard is a scan
//! over [`KeyValueStore::list_accounts`].

use std::collections::BTreeMap;

use crate::error::Result;

/// Key prefix for per-account game records.
pub const GAME_KEY_PREFIX: &str = "game_";

/// Storage key holding the game record for `email`.
pub fn game_key(email: &str) -> String {
    format!("{GAME_KEY_PREFIX}{email}")
}

/// A string-keyed, string-valued store with synchronous access.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys currently present, in the backend's enumeration order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Emails of every account that has a game record.
    fn list_accounts(&self) -> Result<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(GAME_KEY_PREFIX).map(str::to_string))
            .collect())
    }
}

/// In-memory store. Keys enumerate in sorted order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// `window.localStorage`. Only usable in a browser.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(crate::error::Error::StorageUnavailable)?;
        Ok(Self { inner })
    }
}

fn js_err(e: web_sys::wasm_bindgen::JsValue) -> crate::error::Error {
    crate::error::Error::Storage(format!("{e:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.remove_item(key).map_err(js_err)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let len = self.inner.length().map_err(js_err)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(k) = self.inner.key(i).map_err(js_err)? {
                keys.push(k);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nope").is_ok());
    }

    #[test]
    fn list_accounts_filters_by_prefix() {
        let mut store = MemoryStore::new();
        store.set("currentUser", "{}").unwrap();
        store.set(&game_key("bob@example.com"), "{}").unwrap();
        store.set(&game_key("alice@example.com"), "{}").unwrap();
        store.set("unrelated", "x").unwrap();

        let accounts = store.list_accounts().unwrap();
        assert_eq!(accounts, vec!["alice@example.com", "bob@example.com"]);
    }

    #[test]
    fn game_key_format() {
        assert_eq!(game_key("a@b.c"), "game_a@b.c");
    }
}
