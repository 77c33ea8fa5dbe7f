// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;
use crate::models::Transaction;

pub const CSV_HEADER: [&str; 7] = ["ID", "Title", "Amount", "Type", "Category", "Date", "Note"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Write one CSV row per transaction. Fields containing commas, quotes or
/// line breaks are quoted.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for t in transactions {
        wtr.write_record([
            t.id.to_string(),
            t.title.clone(),
            t.amount.to_string(),
            t.r#type.to_string(),
            t.category.clone(),
            t.date.clone(),
            t.note.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, transactions)?;
    Ok(())
}

/// Export the snapshot to `path` and return how many transactions were written.
///
/// An empty snapshot writes nothing and leaves `path` untouched.
pub fn export_to_path(
    transactions: &[Transaction],
    format: ExportFormat,
    path: &Path,
) -> Result<usize, Error> {
    if transactions.is_empty() {
        return Ok(0);
    }

    let file = File::create(path)?;
    match format {
        ExportFormat::Csv => write_csv(transactions, file)?,
        ExportFormat::Json => write_json(transactions, file)?,
    }
    tracing::info!(count = transactions.len(), path = %path.display(), "exported transactions");
    Ok(transactions.len())
}
