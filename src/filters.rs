// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Date window and type/text filters applied to transaction snapshots.
//!
//! Filtering is on calendar dates only. A transaction whose date does not
//! parse as `YYYY-MM-DD` never falls inside a window or a month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Week,
    Month,
    All,
}

impl TimeWindow {
    /// The earliest date still inside the window, or `None` for [`TimeWindow::All`].
    pub fn start(&self, now: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeWindow::Week => Some(
                now.checked_sub_days(Days::new(7))
                    .unwrap_or(NaiveDate::MIN),
            ),
            TimeWindow::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDate::MIN),
            ),
            TimeWindow::All => None,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "all" => Ok(TimeWindow::All),
            other => Err(Error::InvalidWindow(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, r#type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => r#type == TransactionType::Income,
            TypeFilter::Expense => r#type == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => TypeFilter::Income,
            TransactionType::Expense => TypeFilter::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<TransactionType>().map(TypeFilter::from)
    }
}

/// Keep the transactions dated on or after the start of `window`, relative to `now`.
///
/// The boundary day itself is kept. [`TimeWindow::All`] returns the input unchanged,
/// including transactions with unparseable dates.
pub fn filter_by_window(
    transactions: &[Transaction],
    window: TimeWindow,
    now: NaiveDate,
) -> Vec<Transaction> {
    let Some(start) = window.start(now) else {
        return transactions.to_vec();
    };

    transactions
        .iter()
        .filter(|t| t.parsed_date().is_some_and(|date| date >= start))
        .cloned()
        .collect()
}

/// Narrow by type first, then by a case-insensitive substring match on the title.
/// An empty `query` matches every title.
pub fn filter_by_type_and_text(
    transactions: &[Transaction],
    type_filter: TypeFilter,
    query: &str,
) -> Vec<Transaction> {
    let needle = query.to_lowercase();

    transactions
        .iter()
        .filter(|t| type_filter.matches(t.r#type))
        .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Split a `YYYY-MM` string into its year and month number.
pub fn parse_month(month: &str) -> Option<(i32, u32)> {
    let (year, month_number) = month.trim().split_once('-')?;
    if year.len() != 4 || month_number.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month_number: u32 = month_number.parse().ok()?;
    (1..=12).contains(&month_number).then_some((year, month_number))
}

/// Format a date as the `YYYY-MM` month it belongs to.
pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Whether the transaction's calendar year and month equal those encoded in `month`.
pub fn falls_in_month(transaction: &Transaction, month: &str) -> bool {
    match (transaction.parsed_date(), parse_month(month)) {
        (Some(date), Some((year, month_number))) => {
            date.year() == year && date.month() == month_number
        }
        _ => false,
    }
}
