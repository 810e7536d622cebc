mod common;

use common::{date, expense, income, memory_store};
use expense_core::{
    core::services::{SummaryService, ViewService},
    domain::{Category, CategoryFilter},
};

#[test]
fn statistics_for_salary_and_rent() {
    let (mut store, _) = memory_store();
    store.append(income("Salary", 50000.0, date(2024, 1, 1))).unwrap();
    store
        .append(expense("Rent", 12000.0, Category::Rent, date(2024, 1, 10)))
        .unwrap();

    let stats = SummaryService::summary_statistics(store.transactions());
    assert_eq!(stats.total_income, 50000.0);
    assert_eq!(stats.total_expenses, 12000.0);
    assert_eq!(stats.net_balance, 38000.0);
    assert_eq!(stats.count, 2);

    let ordered = ViewService::sort_by_date_descending(store.transactions());
    assert_eq!(ordered[0].description(), "Rent");
    assert_eq!(ordered[1].description(), "Salary");
}

#[test]
fn totals_are_consistent_with_each_other() {
    let (mut store, _) = memory_store();
    store.append(income("Salary", 900.0, date(2024, 3, 1))).unwrap();
    store.append(income("Gift", 100.5, date(2024, 3, 2))).unwrap();
    store
        .append(expense("Groceries", 120.25, Category::Food, date(2024, 3, 3)))
        .unwrap();
    store
        .append(expense("Bus", 30.0, Category::Travel, date(2024, 3, 4)))
        .unwrap();
    store
        .append(expense("Flat", 400.0, Category::Rent, date(2024, 3, 5)))
        .unwrap();
    let txs = store.transactions();

    let stats = SummaryService::summary_statistics(txs);
    assert!((stats.net_balance - (stats.total_income - stats.total_expenses)).abs() < 1e-9);
    assert!((SummaryService::net_balance(txs) - stats.net_balance).abs() < 1e-9);

    let breakdown = SummaryService::expense_breakdown(txs);
    assert!((breakdown.total() - stats.total_expenses).abs() < 1e-9);
    assert_eq!(breakdown.len(), Category::ALL.len());

    let shares: f64 = breakdown.shares().iter().map(|(_, share)| share).sum();
    assert!((shares - 100.0).abs() < 1e-6, "{shares}");
}

#[test]
fn income_never_counts_toward_category_totals() {
    let (mut store, _) = memory_store();
    store.append(income("Refund", 75.0, date(2024, 4, 1))).unwrap();
    let breakdown = SummaryService::expense_breakdown(store.transactions());
    assert_eq!(breakdown.total(), 0.0);
    assert!(breakdown.shares().iter().all(|(_, share)| *share == 0.0));
}

#[test]
fn category_totals_respect_requested_categories() {
    let (mut store, _) = memory_store();
    store
        .append(expense("Lunch", 20.0, Category::Food, date(2024, 5, 1)))
        .unwrap();
    store
        .append(expense("Jacket", 60.0, Category::Shopping, date(2024, 5, 2)))
        .unwrap();
    let totals =
        SummaryService::category_totals(store.transactions(), &[Category::Shopping]);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals.get(Category::Shopping), 60.0);
    assert_eq!(totals.get(Category::Food), 0.0);
}

#[test]
fn empty_ledger_has_zero_everything() {
    let stats = SummaryService::summary_statistics(&[]);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.net_balance, 0.0);
    assert!(ViewService::display_order(&[], CategoryFilter::All).is_empty());
}
