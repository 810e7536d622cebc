use std::{io, result::Result as StdResult};

use rustyline::error::ReadlineError;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the domain, ledger, and storage layers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Index {index} is out of range for a ledger of {len} transaction(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<io::Error> for LedgerError {
    fn from(err: io::Error) -> Self {
        LedgerError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::StorageCorrupt(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_storage_unavailable() {
        let err: LedgerError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(
            err,
            LedgerError::StorageUnavailable(ref message) if message.contains("denied")
        ));
    }

    #[test]
    fn json_errors_map_to_storage_corrupt() {
        let parse = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: LedgerError = parse.into();
        assert!(matches!(err, LedgerError::StorageCorrupt(_)));
    }

    #[test]
    fn index_error_names_position_and_length() {
        let err = LedgerError::IndexOutOfRange { index: 4, len: 2 };
        let message = err.to_string();
        assert!(message.contains('4') && message.contains('2'), "{message}");
    }
}
