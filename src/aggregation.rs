// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over transaction and budget snapshots.
//!
//! Every function here is a deterministic transform of the snapshots handed to
//! it. Nothing is cached between calls and nothing fails: empty input gives
//! zeros or empty collections, and a zero denominator gives a zero percentage.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::filters::falls_in_month;
use crate::models::{
    Balances, Budget, BudgetStatus, CategoryStat, OverallBudgetStatus, Transaction,
    TransactionType,
};

/// `part / whole * 100`, or zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

fn sum_of_type(transactions: &[Transaction], r#type: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.r#type == r#type)
        .map(|t| t.amount)
        .sum()
}

/// Income, expense and their difference over the whole snapshot.
///
/// Dates are not consulted, so transactions with malformed dates still count.
pub fn compute_balances(transactions: &[Transaction]) -> Balances {
    let income = sum_of_type(transactions, TransactionType::Income);
    let expense = sum_of_type(transactions, TransactionType::Expense);

    Balances {
        balance: income - expense,
        income,
        expense,
    }
}

/// Total of all expense amounts in the snapshot.
pub fn total_expense(transactions: &[Transaction]) -> Decimal {
    sum_of_type(transactions, TransactionType::Expense)
}

/// Pair each budget with the expenses recorded against its category in its month.
///
/// Recomputed from scratch on every call, in the order the budgets were given.
pub fn compute_category_spend(
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent = transactions
                .iter()
                .filter(|t| {
                    t.is_expense()
                        && t.category == budget.category
                        && falls_in_month(t, &budget.month)
                })
                .map(|t| t.amount)
                .sum();

            BudgetStatus {
                budget: budget.clone(),
                spent,
            }
        })
        .collect()
}

/// Group expenses by category, largest total first.
///
/// `percentage` is each group's share of `total_expense`. Income transactions
/// are ignored. Ties on amount are ordered by category name. The result is not
/// truncated; showing only the top few is up to the caller.
pub fn compute_category_stats(
    transactions: &[Transaction],
    total_expense: Decimal,
) -> Vec<CategoryStat> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let entry = groups
            .entry(transaction.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += transaction.amount;
        entry.1 += 1;
    }

    let mut stats: Vec<CategoryStat> = groups
        .into_iter()
        .map(|(category, (amount, count))| CategoryStat {
            category: category.to_string(),
            amount,
            count,
            percentage: percent_of(amount, total_expense),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    stats
}

/// Totals across a month's budgets, after their spend has been computed.
pub fn compute_overall_budget_status(statuses: &[BudgetStatus]) -> OverallBudgetStatus {
    let total_budget: Decimal = statuses.iter().map(|s| s.budget.amount).sum();
    let total_spent: Decimal = statuses.iter().map(|s| s.spent).sum();

    OverallBudgetStatus {
        total_budget,
        total_spent,
        overall_percentage: percent_of(total_spent, total_budget),
        remaining: total_budget - total_spent,
    }
}
