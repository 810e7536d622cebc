mod common;

use common::{date, expense, income, memory_store};
use expense_core::{
    core::services::ViewService,
    domain::{Category, CategoryFilter, Identifiable},
};

#[test]
fn all_filter_is_identity() {
    let (mut store, _) = memory_store();
    store
        .append(expense("Lunch", 20.0, Category::Food, date(2024, 1, 3)))
        .unwrap();
    store.append(income("Salary", 500.0, date(2024, 1, 1))).unwrap();
    let filtered = ViewService::filter_by_category(store.transactions(), CategoryFilter::All);
    let ids: Vec<_> = filtered.iter().map(|txn| txn.id()).collect();
    let expected: Vec<_> = store.transactions().iter().map(|txn| txn.id()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn category_filter_is_idempotent_and_exclusive() {
    let (mut store, _) = memory_store();
    store
        .append(expense("Lunch", 20.0, Category::Food, date(2024, 1, 3)))
        .unwrap();
    store
        .append(expense("Flat", 300.0, Category::Rent, date(2024, 1, 4)))
        .unwrap();
    store
        .append(expense("Dinner", 35.0, Category::Food, date(2024, 1, 5)))
        .unwrap();

    let filter = CategoryFilter::Only(Category::Food);
    let once = ViewService::filter_by_category(store.transactions(), filter);
    let twice = ViewService::filter_by_category(once.iter().copied(), filter);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
    assert!(once.iter().all(|txn| txn.category() == Category::Food));
}

#[test]
fn sort_is_stable_for_equal_dates() {
    let (mut store, _) = memory_store();
    let same_day = date(2024, 6, 1);
    store
        .append(expense("First", 1.0, Category::Other, same_day))
        .unwrap();
    store
        .append(expense("Second", 2.0, Category::Other, same_day))
        .unwrap();
    store
        .append(expense("Later", 3.0, Category::Other, date(2024, 6, 2)))
        .unwrap();

    let ordered: Vec<&str> = ViewService::sort_by_date_descending(store.transactions())
        .iter()
        .map(|txn| txn.description())
        .collect();
    assert_eq!(ordered, vec!["Later", "First", "Second"]);
}

#[test]
fn rows_carry_ids_and_signed_amounts() {
    let (mut store, _) = memory_store();
    store
        .append(expense("Lunch", 2000.0, Category::Food, date(2024, 1, 5)))
        .unwrap();
    store.append(income("Salary", 50000.0, date(2024, 1, 1))).unwrap();

    let rows = ViewService::rows(store.transactions(), CategoryFilter::All, "RWF");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].signed_amount, "-2000 RWF");
    assert_eq!(rows[1].signed_amount, "+50000 RWF");
    assert_eq!(rows[0].id, store.transactions()[0].id());
}

#[test]
fn display_order_is_idempotent() {
    let (mut store, _) = memory_store();
    store
        .append(expense("Lunch", 20.0, Category::Food, date(2024, 1, 3)))
        .unwrap();
    store
        .append(expense("Flat", 300.0, Category::Rent, date(2024, 1, 9)))
        .unwrap();
    store
        .append(expense("Snack", 4.0, Category::Food, date(2024, 1, 3)))
        .unwrap();
    store
        .append(expense("Dinner", 35.0, Category::Food, date(2024, 1, 7)))
        .unwrap();

    let filter = CategoryFilter::Only(Category::Food);
    let once = ViewService::sort_by_date_descending(ViewService::filter_by_category(
        store.transactions(),
        filter,
    ));
    let twice = ViewService::sort_by_date_descending(ViewService::filter_by_category(
        once.iter().copied(),
        filter,
    ));
    assert_eq!(once, twice);
    assert_eq!(once, ViewService::display_order(store.transactions(), filter));
    let names: Vec<&str> = once.iter().map(|txn| txn.description()).collect();
    assert_eq!(names, vec!["Dinner", "Lunch", "Snack"]);
}
