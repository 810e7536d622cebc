use std::collections::HashSet;

use uuid::Uuid;

use crate::core::errors::{LedgerError, Result};
use crate::domain::{Identifiable, RawTransactionInput, Transaction, TransactionDraft};
use crate::storage::StorageBackend;

/// Store key used when the configuration does not name one.
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Outcome of reading a snapshot. Loading never fails; problems are
/// reported here and the ledger falls back to empty.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<String>,
    pub quarantined: Option<String>,
}

/// Metadata describing how an opened ledger was loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadMetadata {
    pub key: String,
    pub loaded: usize,
    pub warnings: Vec<String>,
    pub quarantined: Option<String>,
}

/// Owns the in-memory transaction sequence and keeps the persisted snapshot
/// identical to it.
///
/// Every mutation writes the full sequence before it is committed in memory:
/// if the write fails the mutation is rolled back and the error returned.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    key: String,
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    /// Reads the snapshot stored under `key`.
    pub fn load(storage: &dyn StorageBackend, key: &str) -> LoadReport {
        let raw = match storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key, "no stored snapshot; starting with an empty ledger");
                return LoadReport::default();
            }
            Err(LedgerError::StorageCorrupt(reason)) => {
                return corrupt_snapshot(storage, key, &reason);
            }
            Err(err) => {
                tracing::warn!(
                    key,
                    error = %err,
                    "snapshot unreadable; starting with an empty ledger"
                );
                return LoadReport {
                    warnings: vec![format!(
                        "could not read saved transactions ({err}); starting with an empty ledger"
                    )],
                    ..LoadReport::default()
                };
            }
        };

        match serde_json::from_str::<Option<Vec<Transaction>>>(&raw) {
            Ok(parsed) => {
                let transactions = dedupe_ids(parsed.unwrap_or_default());
                let warnings = snapshot_warnings(&transactions);
                tracing::info!(key, count = transactions.len(), "loaded ledger snapshot");
                LoadReport {
                    transactions,
                    warnings,
                    quarantined: None,
                }
            }
            Err(err) => corrupt_snapshot(storage, key, &err.to_string()),
        }
    }

    /// Loads the snapshot under [`DEFAULT_STORAGE_KEY`] and takes ownership of the store.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, LoadMetadata) {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn open_with_key(
        storage: Box<dyn StorageBackend>,
        key: impl Into<String>,
    ) -> (Self, LoadMetadata) {
        let key = key.into();
        let LoadReport {
            transactions,
            warnings,
            quarantined,
        } = Self::load(storage.as_ref(), &key);
        let metadata = LoadMetadata {
            key: key.clone(),
            loaded: transactions.len(),
            warnings,
            quarantined,
        };
        let store = Self {
            transactions,
            key,
            storage,
        };
        (store, metadata)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    /// Resolves a full id or a unique leading fragment of one.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Transaction> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(LedgerError::InvalidInput("transaction id is empty".into()));
        }
        let mut matches = self
            .transactions
            .iter()
            .filter(|txn| txn.id().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (None, _) => Err(LedgerError::InvalidInput(format!(
                "no transaction id starts with `{}`",
                needle
            ))),
            (Some(_), Some(_)) => Err(LedgerError::InvalidInput(format!(
                "id prefix `{}` matches more than one transaction",
                needle
            ))),
        }
    }

    /// Validates and appends a transaction, then persists the full sequence.
    pub fn append(&mut self, draft: TransactionDraft) -> Result<&[Transaction]> {
        let transaction = draft.validate()?;
        let id = transaction.id();
        self.transactions.push(transaction);
        if let Err(err) = self.persist() {
            self.transactions.pop();
            return Err(err);
        }
        tracing::info!(%id, count = self.transactions.len(), "appended transaction");
        Ok(&self.transactions)
    }

    /// Parses raw form values and appends the result.
    pub fn submit(&mut self, input: &RawTransactionInput) -> Result<&[Transaction]> {
        let draft = input.parse()?;
        self.append(draft)
    }

    /// Removes the transaction at `index` in storage order.
    pub fn remove_at(&mut self, index: usize) -> Result<&[Transaction]> {
        self.take_at(index)?;
        Ok(&self.transactions)
    }

    /// Removes the transaction carrying `id` and returns it.
    pub fn remove(&mut self, id: Uuid) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id() == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        self.take_at(index)
    }

    fn take_at(&mut self, index: usize) -> Result<Transaction> {
        if index >= self.transactions.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            });
        }
        let removed = self.transactions.remove(index);
        if let Err(err) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(err);
        }
        tracing::info!(
            id = %removed.id(),
            index,
            count = self.transactions.len(),
            "removed transaction"
        );
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.transactions)?;
        self.storage.set(&self.key, &json)
    }
}

/// Empty ledger for an unreadable snapshot, which is moved aside so the next
/// write cannot overwrite it.
fn corrupt_snapshot(storage: &dyn StorageBackend, key: &str, reason: &str) -> LoadReport {
    tracing::warn!(key, reason, "snapshot corrupt; starting with an empty ledger");
    let mut warnings = vec![format!(
        "saved transactions are corrupt ({reason}); starting with an empty ledger"
    )];
    let quarantined = match storage.quarantine(key) {
        Ok(Some(location)) => {
            warnings.push(format!("the unreadable snapshot was moved to {location}"));
            Some(location)
        }
        Ok(None) => None,
        Err(err) => {
            warnings.push(format!(
                "could not set the unreadable snapshot aside ({err}); it will be replaced on the next change"
            ));
            None
        }
    };
    LoadReport {
        transactions: Vec::new(),
        warnings,
        quarantined,
    }
}

fn snapshot_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, txn) in transactions.iter().enumerate() {
        for problem in txn.problems() {
            warnings.push(format!(
                "saved transaction #{} ({}) {}",
                index + 1,
                txn.id(),
                problem
            ));
        }
    }
    warnings
}

/// Hand-edited snapshots can repeat an id; later copies get a fresh one so
/// removal by id stays unambiguous.
fn dedupe_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .map(|txn| {
            if seen.insert(txn.id()) {
                txn
            } else {
                let fresh = txn.with_fresh_id();
                tracing::warn!(id = %fresh.id(), "reassigned duplicate transaction id");
                seen.insert(fresh.id());
                fresh
            }
        })
        .collect()
}
