// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::feed::Subscription;
use crate::models::Transaction;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct TransactionRepository {
    store: LedgerStore,
}

impl TransactionRepository {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Save a new transaction (id 0) and return the id the store assigned.
    pub async fn insert(&self, transaction: Transaction) -> Result<i64, Error> {
        self.store.insert_transaction(transaction).await
    }

    /// Replace a saved transaction. Returns `false` if its id is unknown.
    pub async fn update(&self, transaction: Transaction) -> Result<bool, Error> {
        self.store.update_transaction(transaction).await
    }

    pub async fn delete(&self, transaction: &Transaction) -> Result<bool, Error> {
        self.store.delete_transaction(transaction.id).await
    }

    pub async fn delete_all(&self) -> Result<usize, Error> {
        self.store.delete_all_transactions().await
    }

    /// A live view of every transaction, newest date first and, within a
    /// date, newest id first.
    pub fn observe_all(&self) -> Subscription<Transaction> {
        self.store.observe_transactions()
    }
}
