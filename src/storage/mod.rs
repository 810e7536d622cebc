//! Key-value persistence used to hold ledger snapshots.

pub mod json_backend;
pub mod memory;

use crate::core::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Named-entry store holding whole serialized values, one per key.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Moves an unreadable entry out of the way so the next write cannot
    /// destroy it, returning a label for where it went.
    fn quarantine(&self, key: &str) -> Result<Option<String>> {
        let _ = key;
        Ok(None)
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
