pub mod category;
pub mod common;
pub mod transaction;

pub use category::{Category, CategoryFilter};
pub use common::{format_amount, Displayable, Identifiable};
pub use transaction::{
    RawTransactionInput, Transaction, TransactionDraft, TransactionKind, DATE_FORMAT,
};
