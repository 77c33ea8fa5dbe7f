// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::User;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct UserRepository {
    store: LedgerStore,
}

impl UserRepository {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Insert the user unless the email is taken. Returns the new id, if any.
    pub async fn register(&self, user: User) -> Result<Option<i64>, Error> {
        self.store.insert_user(user).await
    }

    pub async fn by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.store.user_by_email(email).await
    }
}
