// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime configuration and logging setup.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Tally", "tally"));

pub const DB_ENV: &str = "TALLY_DB";
pub const LOG_ENV: &str = "TALLY_LOG";
pub const DEFAULT_LOG_FILTER: &str = "tally=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolve the configuration. `db_override` (the `--db` flag) wins over
    /// `TALLY_DB`, which wins over the platform data directory.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_override.or_else(|| std::env::var_os(DB_ENV).map(PathBuf::from)) {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_filter =
            std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tally.sqlite"))
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured filter.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
