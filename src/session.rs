// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Who is logged in, persisted in the `settings` table.

use crate::error::Error;
use crate::store::LedgerStore;

pub const SESSION_KEY: &str = "last_logged_in_email";

pub struct Session {
    store: LedgerStore,
    email: Option<String>,
}

impl Session {
    /// Read the persisted identity, if any. Called once at startup.
    pub async fn load(store: LedgerStore) -> Result<Self, Error> {
        let email = store.setting(SESSION_KEY).await?;
        Ok(Self { store, email })
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.email.is_some()
    }

    pub async fn start(&mut self, email: &str) -> Result<(), Error> {
        self.store.set_setting(SESSION_KEY, email).await?;
        self.email = Some(email.to_string());
        Ok(())
    }

    pub async fn end(&mut self) -> Result<(), Error> {
        self.store.remove_setting(SESSION_KEY).await?;
        self.email = None;
        Ok(())
    }
}
