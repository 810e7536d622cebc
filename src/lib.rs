#![doc(test(attr(deny(warnings))))]

//! Expense Core keeps a single-user ledger of income and expense
//! transactions: validated entry, persistence to a key-value store,
//! category filtering, date ordering, and balance and per-category totals.
//! The `expense_core_cli` binary puts a small shell on top of it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{LedgerError, LedgerStore};
pub use crate::domain::{Category, CategoryFilter, Transaction, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
