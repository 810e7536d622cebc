//! Selection and ordering of transactions for the list view.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    format_amount, Category, CategoryFilter, Identifiable, Transaction, TransactionKind,
};

/// Display-ready record handed to a presentation layer. Actions on a row are
/// bound to `id`, never to the row's position.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub kind: TransactionKind,
    pub signed_amount: String,
}

pub struct ViewService;

impl ViewService {
    /// `All` keeps every transaction; otherwise only the selected category,
    /// in input order.
    pub fn filter_by_category<'a, I>(
        transactions: I,
        filter: CategoryFilter,
    ) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|txn| filter.matches(txn.category()))
            .collect()
    }

    /// Most recent first. Equal dates keep their input order.
    pub fn sort_by_date_descending<'a, I>(transactions: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }

    /// Filter then sort: the order the list view renders.
    pub fn display_order(
        transactions: &[Transaction],
        filter: CategoryFilter,
    ) -> Vec<&Transaction> {
        Self::sort_by_date_descending(Self::filter_by_category(transactions, filter))
    }

    pub fn rows(
        transactions: &[Transaction],
        filter: CategoryFilter,
        currency: &str,
    ) -> Vec<DisplayRow> {
        Self::display_order(transactions, filter)
            .into_iter()
            .map(|txn| DisplayRow {
                id: txn.id(),
                date: txn.date(),
                description: txn.description().to_string(),
                category: txn.category(),
                kind: txn.kind(),
                signed_amount: signed_label(txn, currency),
            })
            .collect()
    }
}

/// `-2000 RWF` for expenses, `+50000 RWF` for income.
pub fn signed_label(txn: &Transaction, currency: &str) -> String {
    let sign = match txn.kind() {
        TransactionKind::Expense => "-",
        TransactionKind::Income => "+",
    };
    let amount = format_amount(txn.amount());
    if currency.trim().is_empty() {
        format!("{sign}{amount}")
    } else {
        format!("{sign}{amount} {}", currency.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionDraft;

    fn txn(description: &str, category: Category, kind: TransactionKind, day: u32) -> Transaction {
        TransactionDraft::new(
            description,
            100.0,
            category,
            kind,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
        .validate()
        .unwrap()
    }

    fn descriptions(txns: &[&Transaction]) -> Vec<String> {
        txns.iter().map(|txn| txn.description().to_string()).collect()
    }

    #[test]
    fn all_filter_is_identity() {
        let txns = vec![
            txn("a", Category::Food, TransactionKind::Expense, 3),
            txn("b", Category::Rent, TransactionKind::Expense, 1),
            txn("c", Category::Other, TransactionKind::Income, 2),
        ];
        let filtered = ViewService::filter_by_category(&txns, CategoryFilter::All);
        assert_eq!(descriptions(&filtered), vec!["a", "b", "c"]);
    }

    #[test]
    fn category_filter_preserves_relative_order() {
        let txns = vec![
            txn("a", Category::Food, TransactionKind::Expense, 3),
            txn("b", Category::Rent, TransactionKind::Expense, 1),
            txn("c", Category::Food, TransactionKind::Income, 2),
        ];
        let filtered = ViewService::filter_by_category(&txns, CategoryFilter::Only(Category::Food));
        assert_eq!(descriptions(&filtered), vec!["a", "c"]);
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let txns = vec![
            txn("first", Category::Food, TransactionKind::Expense, 5),
            txn("older", Category::Food, TransactionKind::Expense, 1),
            txn("second", Category::Food, TransactionKind::Expense, 5),
            txn("newest", Category::Food, TransactionKind::Expense, 9),
        ];
        let sorted = ViewService::sort_by_date_descending(&txns);
        assert_eq!(descriptions(&sorted), vec!["newest", "first", "second", "older"]);
    }

    #[test]
    fn rows_carry_signed_amount_and_id() {
        let txns = vec![
            txn("Salary", Category::Other, TransactionKind::Income, 1),
            txn("Rent", Category::Rent, TransactionKind::Expense, 10),
        ];
        let rows = ViewService::rows(&txns, CategoryFilter::All, "RWF");
        assert_eq!(rows[0].description, "Rent");
        assert_eq!(rows[0].signed_amount, "-100 RWF");
        assert_eq!(rows[0].id, txns[1].id());
        assert_eq!(rows[1].signed_amount, "+100 RWF");
    }

    #[test]
    fn blank_currency_drops_suffix() {
        let entry = txn("Bus", Category::Travel, TransactionKind::Expense, 2);
        assert_eq!(signed_label(&entry, " "), "-100");
    }
}
