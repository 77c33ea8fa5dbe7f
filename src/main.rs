// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use tally::config::{self, Config};
use tally::context::AppContext;
use tally::{LedgerStore, cli, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::load(matches.get_one::<PathBuf>("db").cloned())?;
    config::init_logging(&config);

    let store = LedgerStore::open(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;
    let mut ctx = AppContext::new(store).await?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub).await?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub).await?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("user", sub)) => commands::users::handle(&mut ctx, sub).await?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
