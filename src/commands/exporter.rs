// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::export::{ExportFormat, export_to_path};

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ctx, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let format: ExportFormat = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse()?;
    let out = PathBuf::from(sub.get_one::<String>("out").context("out is required")?);

    let snapshot = ctx.transactions.observe_all().latest();
    let written = export_to_path(&snapshot, format, &out)
        .with_context(|| format!("Failed to export to {}", out.display()))?;
    if written == 0 {
        println!("No transactions to export.");
    } else {
        println!("Exported {} transactions to {}", written, out.display());
    }
    Ok(())
}
