// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The crate level error type.

/// The errors that may occur in the ledger store, its repositories and the CLI layer.
///
/// Aggregation never produces one of these: it degrades to zeros and empty
/// collections instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// A blocking store job panicked or was cancelled before it committed.
    #[error("background store task failed: {0}")]
    BackgroundTask(String),

    /// A date string did not match `YYYY-MM-DD`.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A month string did not match `YYYY-MM`.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// An amount was not a number, or was zero or negative.
    #[error("invalid amount '{0}', expected a positive number")]
    InvalidAmount(String),

    /// A transaction type other than `income` or `expense`.
    #[error("invalid transaction type '{0}', expected income or expense")]
    InvalidType(String),

    /// A report window other than `week`, `month` or `all`.
    #[error("invalid window '{0}', expected week, month or all")]
    InvalidWindow(String),

    #[error("unknown export format '{0}' (use csv|json)")]
    UnknownFormat(String),

    /// A required text field was left empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not serialize as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::Sql(value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Error::BackgroundTask(value.to_string())
    }
}
