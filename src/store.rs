// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The SQLite backed ledger store.
//!
//! The store owns record identity and is the only shared mutable resource.
//! Every mutation runs on the blocking pool and, when it changed at least one
//! row, re-reads the full table and publishes it to that table's feed while
//! still holding the connection lock. Publish order therefore always matches
//! commit order.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};

use crate::db::{self, MapRow};
use crate::error::Error;
use crate::feed::{Snapshot, SnapshotFeed, Subscription};
use crate::models::{Budget, Transaction, UNSAVED_ID, User};

const TRANSACTION_SNAPSHOT_SQL: &str = "SELECT id, title, amount, type, category, date, note
     FROM transactions ORDER BY date DESC, id DESC";

const BUDGET_SNAPSHOT_SQL: &str = "SELECT id, category, amount, month FROM budgets ORDER BY id";

#[derive(Clone)]
pub struct LedgerStore {
    connection: Arc<Mutex<Connection>>,
    transactions: Arc<SnapshotFeed<Transaction>>,
    budgets: Arc<SnapshotFeed<Budget>>,
}

impl LedgerStore {
    /// Wrap an open connection, creating the tables if needed and loading the
    /// initial snapshots.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        db::init_schema(&connection)?;
        let transactions = query_all::<Transaction>(&connection, TRANSACTION_SNAPSHOT_SQL)?;
        let budgets = query_all::<Budget>(&connection, BUDGET_SNAPSHOT_SQL)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            transactions: Arc::new(SnapshotFeed::new(transactions)),
            budgets: Arc::new(SnapshotFeed::new(budgets)),
        })
    }

    pub fn open(path: &Path) -> Result<Self, Error> {
        Self::new(db::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::new(db::open_in_memory()?)
    }

    /// Run `job` against the connection on the blocking pool.
    async fn run<F, R>(&self, job: F) -> Result<R, Error>
    where
        F: FnOnce(&LedgerStore, &Connection) -> Result<R, Error> + Send + 'static,
        R: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = store.connection.lock().map_err(|_| Error::DatabaseLock)?;
            job(&store, &connection)
        })
        .await?
    }

    fn publish_transactions(&self, conn: &Connection) -> Result<(), Error> {
        let snapshot = query_all::<Transaction>(conn, TRANSACTION_SNAPSHOT_SQL)?;
        self.transactions.publish(snapshot);
        Ok(())
    }

    fn publish_budgets(&self, conn: &Connection) -> Result<(), Error> {
        let snapshot = query_all::<Budget>(conn, BUDGET_SNAPSHOT_SQL)?;
        self.budgets.publish(snapshot);
        Ok(())
    }

    // Transactions

    /// Insert a transaction and return its id.
    ///
    /// An id of 0 asks the store for a fresh one. Any other id replaces the
    /// row with that id, or creates it.
    pub async fn insert_transaction(&self, transaction: Transaction) -> Result<i64, Error> {
        self.run(move |store, conn| {
            let id = if transaction.id == UNSAVED_ID {
                conn.execute(
                    "INSERT INTO transactions(title, amount, type, category, date, note)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        transaction.title,
                        transaction.amount.to_string(),
                        transaction.r#type,
                        transaction.category,
                        transaction.date,
                        transaction.note
                    ],
                )?;
                conn.last_insert_rowid()
            } else {
                conn.execute(
                    "INSERT OR REPLACE INTO transactions(id, title, amount, type, category, date, note)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        transaction.id,
                        transaction.title,
                        transaction.amount.to_string(),
                        transaction.r#type,
                        transaction.category,
                        transaction.date,
                        transaction.note
                    ],
                )?;
                transaction.id
            };
            tracing::debug!(id, title = %transaction.title, "inserted transaction");
            store.publish_transactions(conn)?;
            Ok(id)
        })
        .await
    }

    /// Replace every field of the transaction with the same id.
    ///
    /// Returns `false` and publishes nothing when no such transaction exists.
    pub async fn update_transaction(&self, transaction: Transaction) -> Result<bool, Error> {
        self.run(move |store, conn| {
            let changed = conn.execute(
                "UPDATE transactions
                 SET title=?2, amount=?3, type=?4, category=?5, date=?6, note=?7
                 WHERE id=?1",
                params![
                    transaction.id,
                    transaction.title,
                    transaction.amount.to_string(),
                    transaction.r#type,
                    transaction.category,
                    transaction.date,
                    transaction.note
                ],
            )?;
            if changed == 0 {
                tracing::debug!(id = transaction.id, "update skipped, no such transaction");
                return Ok(false);
            }
            tracing::debug!(id = transaction.id, "updated transaction");
            store.publish_transactions(conn)?;
            Ok(true)
        })
        .await
    }

    /// Delete the transaction with `id`. Returns `false` when there was none.
    pub async fn delete_transaction(&self, id: i64) -> Result<bool, Error> {
        self.run(move |store, conn| {
            let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
            if changed == 0 {
                tracing::debug!(id, "delete skipped, no such transaction");
                return Ok(false);
            }
            tracing::debug!(id, "deleted transaction");
            store.publish_transactions(conn)?;
            Ok(true)
        })
        .await
    }

    /// Delete every transaction and return how many were removed.
    pub async fn delete_all_transactions(&self) -> Result<usize, Error> {
        self.run(|store, conn| {
            let removed = conn.execute("DELETE FROM transactions", [])?;
            tracing::info!(removed, "cleared transactions");
            if removed > 0 {
                store.publish_transactions(conn)?;
            }
            Ok(removed)
        })
        .await
    }

    /// Subscribe to the transaction table, newest first.
    pub fn observe_transactions(&self) -> Subscription<Transaction> {
        self.transactions.subscribe()
    }

    pub fn transactions_snapshot(&self) -> Snapshot<Transaction> {
        self.transactions.latest()
    }

    // Budgets

    /// Insert a budget, or replace the budget with the same id. Returns the id.
    pub async fn upsert_budget(&self, budget: Budget) -> Result<i64, Error> {
        self.run(move |store, conn| {
            let id = if budget.id == UNSAVED_ID {
                conn.execute(
                    "INSERT INTO budgets(category, amount, month) VALUES (?1, ?2, ?3)",
                    params![budget.category, budget.amount.to_string(), budget.month],
                )?;
                conn.last_insert_rowid()
            } else {
                conn.execute(
                    "INSERT OR REPLACE INTO budgets(id, category, amount, month)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        budget.id,
                        budget.category,
                        budget.amount.to_string(),
                        budget.month
                    ],
                )?;
                budget.id
            };
            tracing::debug!(id, category = %budget.category, month = %budget.month, "saved budget");
            store.publish_budgets(conn)?;
            Ok(id)
        })
        .await
    }

    /// Delete the budget with `id`. Returns `false` when there was none.
    pub async fn delete_budget(&self, id: i64) -> Result<bool, Error> {
        self.run(move |store, conn| {
            let changed = conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
            if changed == 0 {
                tracing::debug!(id, "delete skipped, no such budget");
                return Ok(false);
            }
            tracing::debug!(id, "deleted budget");
            store.publish_budgets(conn)?;
            Ok(true)
        })
        .await
    }

    pub async fn delete_all_budgets(&self) -> Result<usize, Error> {
        self.run(|store, conn| {
            let removed = conn.execute("DELETE FROM budgets", [])?;
            tracing::info!(removed, "cleared budgets");
            if removed > 0 {
                store.publish_budgets(conn)?;
            }
            Ok(removed)
        })
        .await
    }

    /// Subscribe to the budgets whose month is exactly `month` (`YYYY-MM`).
    ///
    /// Budgets arrive in insertion order; callers impose their own ordering.
    pub fn observe_budgets_for_month(&self, month: &str) -> Subscription<Budget> {
        let month = month.to_string();
        self.budgets
            .subscribe()
            .filtered(move |budget: &Budget| budget.month == month)
    }

    pub fn budgets_snapshot(&self) -> Snapshot<Budget> {
        self.budgets.latest()
    }

    // Users

    /// Insert a user unless the email is already registered.
    ///
    /// Returns the new id, or `None` when a user with that email exists.
    pub async fn insert_user(&self, user: User) -> Result<Option<i64>, Error> {
        self.run(move |_, conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users(name, email, password_hash) VALUES (?1, ?2, ?3)",
                params![user.name, user.email, user.password_hash],
            )?;
            if inserted == 0 {
                tracing::debug!(email = %user.email, "user not inserted, email already registered");
                return Ok(None);
            }
            Ok(Some(conn.last_insert_rowid()))
        })
        .await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let email = email.to_string();
        self.run(move |_, conn| {
            let user = conn
                .query_row(
                    "SELECT id, name, email, password_hash FROM users WHERE email=?1 LIMIT 1",
                    params![email],
                    User::map_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn count_users_with_email(&self, email: &str) -> Result<i64, Error> {
        let email = email.to_string();
        self.run(move |_, conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE email=?1",
                params![email],
                |r| r.get(0),
            )?;
            Ok(count)
        })
        .await
    }

    // Settings

    pub async fn setting(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        self.run(move |_, conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM settings WHERE key=?1",
                    params![key],
                    |r| r.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), Error> {
        let key = key.to_string();
        let value = value.to_string();
        self.run(move |_, conn| {
            conn.execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn remove_setting(&self, key: &str) -> Result<(), Error> {
        let key = key.to_string();
        self.run(move |_, conn| {
            conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
            Ok(())
        })
        .await
    }
}

fn query_all<T: MapRow>(conn: &Connection, sql: &str) -> Result<Vec<T>, Error> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], T::map_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
