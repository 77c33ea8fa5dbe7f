// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::percent_of;
use crate::error::Error;

/// Date format used for persisted transaction dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Id carried by records that have not been persisted yet.
pub const UNSAVED_ID: i64 = 0;

pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 6] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Categories offered to the user for this type. The store does not
    /// constrain `category` to this list.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidType(s.to_string())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// A transaction that has not been saved yet. The store assigns the id on insert.
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        r#type: TransactionType,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            amount,
            r#type,
            category: category.into(),
            date: date.into(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// The calendar date, or `None` when `date` is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal, // ceiling for the month
    pub month: String,   // YYYY-MM
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: Decimal, month: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            category: category.into(),
            amount,
            month: month.into(),
        }
    }
}

/// A budget paired with what has been spent against it.
///
/// `spent` is derived from the transaction snapshot on every aggregation pass
/// and is never written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Decimal,
}

impl BudgetStatus {
    /// Share of the budget consumed, in percent. Not clamped: values above 100
    /// mean the budget has been exceeded. Zero when the budget amount is not positive.
    pub fn percentage(&self) -> Decimal {
        percent_of(self.spent, self.budget.amount)
    }

    pub fn remaining(&self) -> Decimal {
        self.budget.amount - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget.amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Compared by plain string equality on log in.
    pub password_hash: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Expense totals for one category over a (possibly filtered) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Balances {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverallBudgetStatus {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub overall_percentage: Decimal,
    pub remaining: Decimal,
}
