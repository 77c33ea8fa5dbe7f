// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed façades over the [`LedgerStore`](crate::store::LedgerStore).
//!
//! Repositories hold nothing but a handle on the store and add no validation
//! of their own.

pub mod budgets;
pub mod transactions;
pub mod users;

pub use budgets::BudgetRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;
