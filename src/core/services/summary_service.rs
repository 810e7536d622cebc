//! Totals and statistics derived from a transaction sequence.
//!
//! Everything here is recomputed from scratch on each call.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Transaction};

/// Expense total for one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Per-category expense totals, in the order the categories were requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Total for `category`; zero when the category was not requested.
    pub fn get(&self, category: Category) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum across all listed categories.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.total).sum()
    }

    /// Percentage of the overall total held by each category. All shares are
    /// zero when there are no expenses.
    pub fn shares(&self) -> Vec<(Category, f64)> {
        let total = self.total();
        self.entries
            .iter()
            .map(|entry| {
                let share = if total > 0.0 {
                    entry.total / total * 100.0
                } else {
                    0.0
                };
                (entry.category, share)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryStatistics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub count: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Income adds, expenses subtract; zero for an empty sequence.
    pub fn net_balance(transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .fold(0.0, |balance, txn| balance + txn.signed_amount())
    }

    /// Expense totals for each of `categories`. Income never contributes.
    pub fn category_totals(
        transactions: &[Transaction],
        categories: &[Category],
    ) -> CategoryTotals {
        let entries = categories
            .iter()
            .map(|&category| CategoryTotal {
                category,
                total: transactions
                    .iter()
                    .filter(|txn| txn.is_expense() && txn.category() == category)
                    .map(Transaction::amount)
                    .sum(),
            })
            .collect();
        CategoryTotals { entries }
    }

    /// Totals over every category, in chart order.
    pub fn expense_breakdown(transactions: &[Transaction]) -> CategoryTotals {
        Self::category_totals(transactions, &Category::ALL)
    }

    pub fn summary_statistics(transactions: &[Transaction]) -> SummaryStatistics {
        let (total_income, total_expenses) =
            transactions.iter().fold((0.0, 0.0), |(income, expenses), txn| {
                if txn.is_income() {
                    (income + txn.amount(), expenses)
                } else {
                    (income, expenses + txn.amount())
                }
            });
        SummaryStatistics {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            count: transactions.len(),
        }
    }
}
