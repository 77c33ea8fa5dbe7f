// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::{Budget, Transaction, User};

pub fn open(path: &Path) -> Result<Connection, Error> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    tracing::info!("opened ledger database at {}", path.display());
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, Error> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        date TEXT NOT NULL, -- YYYY-MM-DD
        note TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    -- (category, month) uniqueness is advisory and checked by callers
    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        month TEXT NOT NULL -- YYYY-MM
    );
    CREATE INDEX IF NOT EXISTS idx_budgets_month ON budgets(month);

    CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Convert a query row into a model.
///
/// Rows are expected to hold the table columns in the order they were defined.
pub trait MapRow: Sized {
    fn map_row(row: &Row) -> rusqlite::Result<Self>;
}

fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    text.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl MapRow for Transaction {
    fn map_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Transaction {
            id: row.get(0)?,
            title: row.get(1)?,
            amount: decimal_column(row, 2)?,
            r#type: row.get(3)?,
            category: row.get(4)?,
            date: row.get(5)?,
            note: row.get(6)?,
        })
    }
}

impl MapRow for Budget {
    fn map_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: decimal_column(row, 2)?,
            month: row.get(3)?,
        })
    }
}

impl MapRow for User {
    fn map_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
        })
    }
}
