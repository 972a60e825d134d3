//! In-memory key-value store.
//!
//! Values are lost when the process exits. Clones share the same map.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StoreError, Update};

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the map lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if the map lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(key);
        Ok(())
    }

    fn update(&self, key: &str, apply: Update<'_>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(value) = apply(entries.get(key).map(String::as_str))? {
            entries.insert(key.to_owned(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1".to_string()).unwrap();
        store.set("k", "v2".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len().unwrap(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_update_is_atomic_across_threads() {
        let store = MemoryStore::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..25 {
                        store
                            .update("n", &mut |current| {
                                let n: u32 = current.map_or(0, |v| v.parse().unwrap());
                                Ok(Some((n + 1).to_string()))
                            })
                            .unwrap();
                    }
                });
            }
        });
        assert_eq!(store.get("n").unwrap().as_deref(), Some("100"));
    }

    #[test]
    fn test_failed_update_keeps_value() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string()).unwrap();
        let result = store.update("k", &mut |_| Err(StoreError::LockPoisoned));
        assert!(result.is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
