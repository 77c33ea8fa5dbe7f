// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Long-lived handles built once at process start and passed by reference to
//! every consumer.

use crate::auth::Auth;
use crate::error::Error;
use crate::repository::{BudgetRepository, TransactionRepository, UserRepository};
use crate::session::Session;
use crate::store::LedgerStore;

pub struct AppContext {
    pub store: LedgerStore,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub auth: Auth,
    pub session: Session,
}

impl AppContext {
    pub async fn new(store: LedgerStore) -> Result<Self, Error> {
        let session = Session::load(store.clone()).await?;

        Ok(Self {
            transactions: TransactionRepository::new(store.clone()),
            budgets: BudgetRepository::new(store.clone()),
            auth: Auth::new(UserRepository::new(store.clone())),
            session,
            store,
        })
    }
}
