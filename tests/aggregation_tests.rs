// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally::aggregation::{
    compute_balances, compute_category_spend, compute_category_stats,
    compute_overall_budget_status, total_expense,
};
use tally::filters::{TimeWindow, filter_by_window};
use tally::models::{Budget, Transaction, TransactionType};

fn expense(title: &str, amount: i64, category: &str, date: &str) -> Transaction {
    Transaction::new(title, Decimal::from(amount), TransactionType::Expense, category, date)
}

fn income(title: &str, amount: i64, date: &str) -> Transaction {
    Transaction::new(title, Decimal::from(amount), TransactionType::Income, "Salary", date)
}

fn food_budget() -> Budget {
    Budget::new("Food", Decimal::from(1000), "2024-06")
}

#[test]
fn empty_snapshot_gives_zeros() {
    let balances = compute_balances(&[]);
    assert_eq!(balances.income, Decimal::ZERO);
    assert_eq!(balances.expense, Decimal::ZERO);
    assert_eq!(balances.balance, Decimal::ZERO);
    assert!(compute_category_stats(&[], Decimal::ZERO).is_empty());

    let overall = compute_overall_budget_status(&[]);
    assert_eq!(overall.overall_percentage, Decimal::ZERO);
}

#[test]
fn budget_partially_spent() {
    let txs = vec![expense("Lunch", 250, "Food", "2024-06-01")];
    let statuses = compute_category_spend(&[food_budget()], &txs);

    let status = &statuses[0];
    assert_eq!(status.spent, Decimal::from(250));
    assert_eq!(status.percentage(), Decimal::from(25));
    assert_eq!(status.remaining(), Decimal::from(750));
    assert!(!status.is_over_budget());
}

#[test]
fn budget_overspent() {
    let txs = vec![
        expense("Lunch", 250, "Food", "2024-06-01"),
        expense("Party", 900, "Food", "2024-06-15"),
    ];
    let statuses = compute_category_spend(&[food_budget()], &txs);

    let status = &statuses[0];
    assert_eq!(status.spent, Decimal::from(1150));
    assert!(status.is_over_budget());
    assert_eq!(status.remaining(), Decimal::from(-150));
    assert_eq!(status.percentage(), Decimal::from(115));
}

#[test]
fn spend_ignores_income_other_categories_and_other_months() {
    let txs = vec![
        expense("Lunch", 250, "Food", "2024-06-01"),
        expense("Bus", 40, "Transport", "2024-06-02"),
        expense("May lunch", 300, "Food", "2024-05-31"),
        income("Refund", 100, "2024-06-03"),
    ];
    let statuses = compute_category_spend(&[food_budget()], &txs);
    assert_eq!(statuses[0].spent, Decimal::from(250));
}

#[test]
fn zero_budget_has_zero_percentage() {
    let budget = Budget::new("Food", Decimal::ZERO, "2024-06");
    let txs = vec![expense("Lunch", 250, "Food", "2024-06-01")];
    let statuses = compute_category_spend(&[budget], &txs);
    assert_eq!(statuses[0].percentage(), Decimal::ZERO);
    assert!(statuses[0].is_over_budget());
}

#[test]
fn overall_status_sums_every_budget() {
    let budgets = vec![
        food_budget(),
        Budget::new("Transport", Decimal::from(1000), "2024-06"),
    ];
    let txs = vec![
        expense("Lunch", 250, "Food", "2024-06-01"),
        expense("Taxi", 250, "Transport", "2024-06-02"),
    ];
    let overall = compute_overall_budget_status(&compute_category_spend(&budgets, &txs));
    assert_eq!(overall.total_budget, Decimal::from(2000));
    assert_eq!(overall.total_spent, Decimal::from(500));
    assert_eq!(overall.overall_percentage, Decimal::from(25));
    assert_eq!(overall.remaining, Decimal::from(1500));
}

#[test]
fn category_stats_sorted_and_sum_to_one_hundred() {
    let txs = vec![
        expense("Lunch", 100, "Food", "2024-06-01"),
        expense("Dinner", 200, "Food", "2024-06-02"),
        expense("Bus", 300, "Transport", "2024-06-02"),
        expense("Film", 100, "Entertainment", "2024-06-03"),
        income("Salary", 5000, "2024-06-01"),
    ];
    let stats = compute_category_stats(&txs, total_expense(&txs));

    let order: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(order, vec!["Food", "Transport", "Entertainment"]);
    assert_eq!(stats[0].count, 2);
    assert_eq!(stats[0].amount, Decimal::from(300));

    let sum: Decimal = stats.iter().map(|s| s.percentage).sum();
    assert!((sum - Decimal::ONE_HUNDRED).abs() < Decimal::new(1, 6));
}

#[test]
fn aggregation_is_idempotent() {
    let txs = vec![
        expense("Lunch", 250, "Food", "2024-06-01"),
        expense("May lunch", 300, "Food", "2024-05-20"),
        expense("Bus", 40, "Transport", "2024-06-02"),
        expense("Mystery", 70, "Food", "sometime"),
        income("Salary", 50000, "2024-06-01"),
    ];
    let budgets = vec![
        food_budget(),
        Budget::new("Transport", Decimal::from(100), "2024-06"),
        Budget::new("Food", Decimal::from(800), "2024-05"),
    ];

    let first = compute_category_spend(&budgets, &txs);
    let second = compute_category_spend(&budgets, &txs);
    assert_eq!(first, second);
    let spent: Vec<Decimal> = first.iter().map(|s| s.spent).collect();
    assert_eq!(
        spent,
        vec![Decimal::from(250), Decimal::from(40), Decimal::from(300)]
    );

    assert_eq!(compute_balances(&txs), compute_balances(&txs));
    assert_eq!(
        compute_category_stats(&txs, total_expense(&txs)),
        compute_category_stats(&txs, total_expense(&txs))
    );
}

#[test]
fn malformed_dates_count_in_balances_but_not_windows() {
    let txs = vec![
        expense("Mystery", 70, "Other", "sometime"),
        expense("Lunch", 250, "Food", "2024-06-07"),
    ];
    assert_eq!(compute_balances(&txs).expense, Decimal::from(320));

    let now = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
    let week = filter_by_window(&txs, TimeWindow::Week, now);
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].title, "Lunch");
    assert_eq!(filter_by_window(&txs, TimeWindow::All, now).len(), 2);
    assert!(txs[1].is_expense() && !txs[1].is_income());
}
