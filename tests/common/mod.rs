#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use expense_core::{
    config::ConfigManager,
    core::LedgerStore,
    domain::{Category, RawTransactionInput, TransactionDraft, TransactionKind},
    storage::{JsonStorage, MemoryStorage},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store and config manager backed by an isolated directory.
pub fn setup_test_env() -> (LedgerStore, ConfigManager, JsonStorage) {
    let base = temp_base();
    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let (store, _) = LedgerStore::open(Box::new(storage.clone()));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (store, config_manager, storage)
}

/// Store over shared in-memory entries; the returned handle sees every write.
pub fn memory_store() -> (LedgerStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let (store, _) = LedgerStore::open(Box::new(storage.clone()));
    (store, storage)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn expense(
    description: &str,
    amount: f64,
    category: Category,
    on: NaiveDate,
) -> TransactionDraft {
    TransactionDraft::new(description, amount, category, TransactionKind::Expense, on)
}

pub fn income(description: &str, amount: f64, on: NaiveDate) -> TransactionDraft {
    TransactionDraft::new(description, amount, Category::Other, TransactionKind::Income, on)
}

pub fn raw(
    description: &str,
    amount: &str,
    category: &str,
    kind: &str,
    on: &str,
) -> RawTransactionInput {
    RawTransactionInput::new(description, amount, category, kind, on)
}
