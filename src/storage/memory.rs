use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::core::errors::LedgerError;

use super::{Result, StorageBackend};

/// In-process store. Clones share the same entries, so a caller can keep a
/// handle and inspect what a ledger persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

fn poisoned() -> LedgerError {
    LedgerError::StorageUnavailable("memory store lock poisoned".into())
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn quarantine(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let Some(value) = entries.remove(key) else {
            return Ok(None);
        };
        let target = format!("{key}.corrupt");
        entries.insert(target.clone(), value);
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("transactions", "[]").unwrap();
        assert_eq!(handle.get("transactions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn quarantine_renames_key() {
        let storage = MemoryStorage::with_entry("transactions", "oops");
        let moved = storage.quarantine("transactions").unwrap();
        assert_eq!(moved.as_deref(), Some("transactions.corrupt"));
        assert_eq!(storage.get("transactions").unwrap(), None);
        assert_eq!(storage.keys(), vec!["transactions.corrupt".to_string()]);
    }
}
