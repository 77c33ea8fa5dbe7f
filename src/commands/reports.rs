// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregation::{compute_category_stats, total_expense};
use crate::context::AppContext;
use crate::filters::{TimeWindow, filter_by_window};
use crate::reports::{home_summary, report_summary};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table, today};
use anyhow::Result;

pub fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(ctx, sub)?,
        Some(("summary", sub)) => summary(ctx, sub)?,
        Some(("categories", sub)) => categories(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn window_from(sub: &clap::ArgMatches) -> Result<TimeWindow> {
    Ok(sub
        .get_one::<String>("window")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default())
}

fn balances(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let summary = home_summary(&ctx.transactions.observe_all().latest());
    if maybe_print_json(sub.get_flag("json"), &summary)? {
        return Ok(());
    }

    let b = &summary.balances;
    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expense"],
            vec![vec![fmt_money(&b.balance), fmt_money(&b.income), fmt_money(&b.expense)]],
        )
    );
    if !summary.recent.is_empty() {
        let recent = summary
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.clone(),
                    t.title.clone(),
                    t.r#type.to_string(),
                    fmt_money(&t.amount),
                    t.category.clone(),
                ]
            })
            .collect();
        println!("Recent");
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Type", "Amount", "Category"], recent)
        );
    }
    Ok(())
}

fn summary(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_from(sub)?;
    let report = report_summary(&ctx.transactions.observe_all().latest(), window, today());
    if maybe_print_json(sub.get_flag("json"), &report)? {
        return Ok(());
    }

    println!(
        "{} transactions this {}: income {}, expense {}",
        report.transaction_count,
        report.window,
        fmt_money(&report.income),
        fmt_money(&report.expense)
    );
    let data = report
        .top_categories
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_money(&s.amount),
                s.count.to_string(),
                fmt_percent(&s.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Top categories", "Spent", "Count", "Share"], data)
    );
    Ok(())
}

fn categories(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let window = window_from(sub)?;
    let snapshot = ctx.transactions.observe_all().latest();
    let filtered = filter_by_window(&snapshot, window, today());
    let mut stats = compute_category_stats(&filtered, total_expense(&filtered));
    if let Some(top) = sub.get_one::<usize>("top") {
        stats.truncate(*top);
    }
    if maybe_print_json(sub.get_flag("json"), &stats)? {
        return Ok(());
    }

    let data = stats
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_money(&s.amount),
                s.count.to_string(),
                fmt_percent(&s.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Count", "Share"], data)
    );
    Ok(())
}
