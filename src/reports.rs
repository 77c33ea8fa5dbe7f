// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Views assembled for display from the aggregation functions.
//!
//! Truncation to the top few rows and clamping of progress values happen here,
//! never in the derived data itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::aggregation::{
    compute_balances, compute_category_spend, compute_category_stats,
    compute_overall_budget_status, total_expense,
};
use crate::feed::Subscription;
use crate::filters::{TimeWindow, filter_by_window};
use crate::repository::{BudgetRepository, TransactionRepository};
use crate::models::{
    Balances, Budget, BudgetStatus, CategoryStat, OverallBudgetStatus, Transaction,
};

pub const RECENT_TRANSACTIONS: usize = 5;
pub const TOP_CATEGORIES: usize = 5;

/// Consumption, in percent, from which a budget is shown as nearly exhausted.
pub const WARNING_PERCENT: u8 = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSummary {
    pub balances: Balances,
    pub recent: Vec<Transaction>,
}

/// Balances over everything plus the most recent few transactions.
/// `transactions` is expected newest first, as the store delivers it.
pub fn home_summary(transactions: &[Transaction]) -> HomeSummary {
    HomeSummary {
        balances: compute_balances(transactions),
        recent: transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub window: TimeWindow,
    pub transaction_count: usize,
    pub income: Decimal,
    pub expense: Decimal,
    pub top_categories: Vec<CategoryStat>,
}

pub fn report_summary(
    transactions: &[Transaction],
    window: TimeWindow,
    now: NaiveDate,
) -> ReportSummary {
    let filtered = filter_by_window(transactions, window, now);
    let balances = compute_balances(&filtered);
    let mut top_categories = compute_category_stats(&filtered, total_expense(&filtered));
    top_categories.truncate(TOP_CATEGORIES);

    ReportSummary {
        window,
        transaction_count: filtered.len(),
        income: balances.income,
        expense: balances.expense,
        top_categories,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Ok,
    Warning,
    Over,
}

impl BudgetHealth {
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            BudgetHealth::Over
        } else if percentage >= Decimal::from(WARNING_PERCENT) {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Ok
        }
    }
}

/// A percentage as a whole number in `0..=100`, for progress bars.
pub fn progress_percent(percentage: Decimal) -> u8 {
    percentage
        .trunc()
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u8()
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub month: String,
    /// Most consumed first.
    pub budgets: Vec<BudgetStatus>,
    pub overall: OverallBudgetStatus,
}

impl BudgetOverview {
    pub fn health(&self) -> BudgetHealth {
        BudgetHealth::from_percentage(self.overall.overall_percentage)
    }
}

pub fn budget_overview(
    month: &str,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> BudgetOverview {
    let mut statuses = compute_category_spend(budgets, transactions);
    let overall = compute_overall_budget_status(&statuses);
    statuses.sort_by(|a, b| b.percentage().cmp(&a.percentage()));

    BudgetOverview {
        month: month.to_string(),
        budgets: statuses,
        overall,
    }
}

/// Keeps a month's budget overview current against two independent feeds.
///
/// Transactions and budgets arrive in no particular order relative to each
/// other, so every emission from either side recomputes the overview from the
/// newest snapshot of each.
pub struct BudgetBoard {
    month: String,
    transactions: Subscription<Transaction>,
    budgets: Subscription<Budget>,
}

impl BudgetBoard {
    /// Watch `month` (`YYYY-MM`): every transaction, and the budgets of that month.
    pub fn new(
        month: &str,
        transactions: &TransactionRepository,
        budgets: &BudgetRepository,
    ) -> Self {
        Self {
            month: month.to_string(),
            transactions: transactions.observe_all(),
            budgets: budgets.budgets_for_month(month),
        }
    }

    /// The overview over the newest snapshot of each feed.
    pub fn current(&mut self) -> BudgetOverview {
        let budgets = self.budgets.latest();
        let transactions = self.transactions.latest();
        budget_overview(&self.month, &budgets, &transactions)
    }

    /// Wait for either feed to emit and return the recomputed overview.
    /// Returns `None` once the store has gone away.
    pub async fn next(&mut self) -> Option<BudgetOverview> {
        let received = tokio::select! {
            snapshot = self.transactions.recv() => snapshot.is_some(),
            snapshot = self.budgets.recv() => snapshot.is_some(),
        };
        received.then(|| self.current())
    }
}
