// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally::filters::{TimeWindow, TypeFilter, filter_by_type_and_text, filter_by_window};
use tally::models::{Transaction, TransactionType};

fn tx(title: &str, r#type: TransactionType, date: &str) -> Transaction {
    Transaction::new(title, Decimal::ONE, r#type, "Other", date)
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("Coffee", TransactionType::Expense, "2024-06-08"),
        tx("Salary June", TransactionType::Income, "2024-06-01"),
        tx("Groceries", TransactionType::Expense, "2024-05-31"),
        tx("Salary May", TransactionType::Income, "2024-05-08"),
        tx("Old coffee", TransactionType::Expense, "2024-05-07"),
    ]
}

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()
}

fn titles(txs: &[Transaction]) -> Vec<&str> {
    txs.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn window_boundaries_are_inclusive() {
    let txs = sample();
    assert_eq!(
        titles(&filter_by_window(&txs, TimeWindow::Week, now())),
        vec!["Coffee", "Salary June"]
    );
    assert_eq!(
        titles(&filter_by_window(&txs, TimeWindow::Month, now())),
        vec!["Coffee", "Salary June", "Groceries", "Salary May"]
    );
}

#[test]
fn windows_nest() {
    let txs = sample();
    let week = filter_by_window(&txs, TimeWindow::Week, now());
    let month = filter_by_window(&txs, TimeWindow::Month, now());
    let all = filter_by_window(&txs, TimeWindow::All, now());

    assert!(week.iter().all(|t| month.contains(t)));
    assert!(month.iter().all(|t| all.contains(t)));
    assert_eq!(all, txs);
}

#[test]
fn all_and_empty_query_is_identity() {
    let txs = sample();
    assert_eq!(filter_by_type_and_text(&txs, TypeFilter::All, ""), txs);
}

#[test]
fn type_then_case_insensitive_text() {
    let txs = sample();
    assert_eq!(
        titles(&filter_by_type_and_text(&txs, TypeFilter::Expense, "COFFEE")),
        vec!["Coffee", "Old coffee"]
    );
    assert_eq!(
        titles(&filter_by_type_and_text(&txs, TypeFilter::Income, "")),
        vec!["Salary June", "Salary May"]
    );
    assert!(filter_by_type_and_text(&txs, TypeFilter::Income, "coffee").is_empty());
}

#[test]
fn window_parses_from_cli_text() {
    assert_eq!("Month".parse::<TimeWindow>().unwrap(), TimeWindow::Month);
    assert_eq!(TimeWindow::default(), TimeWindow::Week);
    assert!("year".parse::<TimeWindow>().is_err());
}
