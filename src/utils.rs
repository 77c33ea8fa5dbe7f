// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::filters;
use crate::models::DATE_FORMAT;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_month() -> String {
    filters::month_of(today())
}

/// Validate a `YYYY-MM-DD` date and return it in canonical form.
pub fn parse_date(s: &str) -> Result<String, Error> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

pub fn parse_month(s: &str) -> Result<String, Error> {
    filters::parse_month(s)
        .map(|(year, month)| format!("{:04}-{:02}", year, month))
        .ok_or_else(|| Error::InvalidMonth(s.to_string()))
}

/// Parse a strictly positive amount.
pub fn parse_amount(s: &str) -> Result<Decimal, Error> {
    match s.trim().parse::<Decimal>() {
        Ok(d) if d > Decimal::ZERO => Ok(d),
        _ => Err(Error::InvalidAmount(s.to_string())),
    }
}

pub fn non_empty(s: &str, field: &'static str) -> Result<String, Error> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.0}%", d.round_dp(0))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
