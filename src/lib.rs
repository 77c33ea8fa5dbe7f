// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregation;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod export;
pub mod feed;
pub mod filters;
pub mod models;
pub mod reports;
pub mod repository;
pub mod session;
pub mod store;
pub mod utils;

pub use error::Error;
pub use store::LedgerStore;
