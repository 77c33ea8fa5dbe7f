// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::feed::Subscription;
use crate::models::{Budget, EXPENSE_CATEGORIES};
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct BudgetRepository {
    store: LedgerStore,
}

impl BudgetRepository {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// A live view of the budgets for `month` (`YYYY-MM`).
    pub fn budgets_for_month(&self, month: &str) -> Subscription<Budget> {
        self.store.observe_budgets_for_month(month)
    }

    pub async fn insert_or_update(&self, budget: Budget) -> Result<i64, Error> {
        self.store.upsert_budget(budget).await
    }

    pub async fn delete(&self, budget: &Budget) -> Result<bool, Error> {
        self.store.delete_budget(budget.id).await
    }

    pub async fn delete_all(&self) -> Result<usize, Error> {
        self.store.delete_all_budgets().await
    }
}

/// Expense categories that do not have a budget yet among `budgets`.
///
/// One budget per category and month is a convention the store does not
/// enforce; callers offering new budgets pick from this list.
pub fn available_budget_categories(budgets: &[Budget]) -> Vec<&'static str> {
    EXPENSE_CATEGORIES
        .iter()
        .copied()
        .filter(|category| !budgets.iter().any(|b| b.category == *category))
        .collect()
}
