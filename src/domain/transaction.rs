//! Income and expense records plus the validation that guards their creation.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::domain::{
    category::Category,
    common::{format_amount, Displayable, Identifiable},
};

/// Date format accepted from user input and used in snapshots.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction's effect on the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// Sign used when folding amounts into a balance.
    pub fn sign(&self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type `{}` (expected Income or Expense)",
                other
            ))),
        }
    }
}

/// A recorded income or expense event.
///
/// Fields are read-only: a transaction is never edited after creation, only
/// appended to or removed from the ledger. Instances are produced by
/// [`TransactionDraft::validate`] or by deserializing a stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    description: String,
    amount: f64,
    category: Category,
    #[serde(rename = "type")]
    kind: TransactionKind,
    date: NaiveDate,
}

impl Transaction {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    pub(crate) fn with_fresh_id(mut self) -> Self {
        self.id = Uuid::new_v4();
        self
    }

    /// Problems that would have rejected this record at entry time.
    ///
    /// Snapshots are not re-validated on load, so a hand-edited file can
    /// contain records that bypassed [`TransactionDraft::validate`].
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.description.trim().is_empty() {
            problems.push("description is empty".to_string());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            problems.push(format!("amount {} is not a positive number", self.amount));
        }
        problems
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} - {} ({}) : {}",
            self.date.format(DATE_FORMAT),
            self.description,
            self.category,
            format_amount(self.signed_amount())
        )
    }
}

/// Typed fields for a transaction that has not been validated yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category,
            kind,
            date,
        }
    }

    /// Checks the draft and mints a transaction with a fresh identifier.
    pub fn validate(self) -> Result<Transaction, LedgerError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(LedgerError::InvalidInput(
                "description must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "amount `{}` is not a finite number",
                self.amount
            )));
        }
        if self.amount <= 0.0 {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be positive, got {}",
                format_amount(self.amount)
            )));
        }
        Ok(Transaction {
            id: Uuid::new_v4(),
            description: description.to_string(),
            amount: self.amount,
            category: self.category,
            kind: self.kind,
            date: self.date,
        })
    }
}

/// Untyped form values as submitted by a presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransactionInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
    pub date: String,
}

impl RawTransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        kind: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            kind: kind.into(),
            date: date.into(),
        }
    }

    /// Converts form values into a typed draft.
    ///
    /// All missing fields are reported together; format errors are reported
    /// for the first offending field.
    pub fn parse(&self) -> Result<TransactionDraft, LedgerError> {
        let missing: Vec<&str> = [
            ("description", &self.description),
            ("amount", &self.amount),
            ("category", &self.category),
            ("type", &self.kind),
            ("date", &self.date),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
        if !missing.is_empty() {
            return Err(LedgerError::InvalidInput(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let amount = parse_amount(&self.amount)?;
        let category = self.category.parse::<Category>()?;
        let kind = self.kind.parse::<TransactionKind>()?;
        let date = parse_date(&self.date)?;
        Ok(TransactionDraft::new(
            self.description.trim(),
            amount,
            category,
            kind,
            date,
        ))
    }
}

pub fn parse_amount(value: &str) -> Result<f64, LedgerError> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| LedgerError::InvalidInput(format!("amount `{}` is not a number", trimmed)))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        LedgerError::InvalidInput(format!("date `{}` is not a YYYY-MM-DD date", trimmed))
    })
}
