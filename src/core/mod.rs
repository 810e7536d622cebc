pub mod errors;
pub mod ledger_store;
pub mod services;
pub mod utils;

pub use errors::{CliError, LedgerError};
pub use ledger_store::{LedgerStore, LoadMetadata, LoadReport, DEFAULT_STORAGE_KEY};
