// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Registration and log in.
//!
//! Rejections come back as outcome values rather than errors so callers can
//! branch on them directly. Passwords are stored and compared as given; there
//! is no hashing step.

use serde::Serialize;

use crate::error::Error;
use crate::models::User;
use crate::repository::UserRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RegistrationOutcome {
    Registered(User),
    EmailAlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoginOutcome {
    Success(User),
    InvalidCredentials,
}

#[derive(Clone)]
pub struct Auth {
    users: UserRepository,
}

impl Auth {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegistrationOutcome, Error> {
        if self.users.by_email(email).await?.is_some() {
            tracing::info!(email, "registration rejected, email already exists");
            return Ok(RegistrationOutcome::EmailAlreadyExists);
        }

        let mut user = User::new(name, email, password);
        // The store ignores the insert if another registration won the race.
        match self.users.register(user.clone()).await? {
            Some(id) => {
                user.id = id;
                tracing::info!(id, email, "registered user");
                Ok(RegistrationOutcome::Registered(user))
            }
            None => Ok(RegistrationOutcome::EmailAlreadyExists),
        }
    }

    pub async fn log_in(&self, email: &str, password: &str) -> Result<LoginOutcome, Error> {
        match self.users.by_email(email).await? {
            Some(user) if user.password_hash == password => Ok(LoginOutcome::Success(user)),
            _ => {
                tracing::info!(email, "log in rejected");
                Ok(LoginOutcome::InvalidCredentials)
            }
        }
    }
}
