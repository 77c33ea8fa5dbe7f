// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::filters::{TimeWindow, TypeFilter, filter_by_type_and_text, filter_by_window};
use crate::models::{Transaction, TransactionType};
use crate::utils::{
    fmt_money, maybe_print_json, non_empty, parse_amount, parse_date, pretty_table, today,
};

pub async fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub).await?,
        Some(("edit", sub)) => edit(ctx, sub).await?,
        Some(("rm", sub)) => rm(ctx, sub).await?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("clear", _)) => {
            let removed = ctx.transactions.delete_all().await?;
            println!("Removed {} transactions", removed);
        }
        _ => {}
    }
    Ok(())
}

fn find(ctx: &AppContext, id: i64) -> Option<Transaction> {
    ctx.transactions
        .observe_all()
        .latest()
        .iter()
        .find(|t| t.id == id)
        .cloned()
}

async fn add(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let title = non_empty(sub.get_one::<String>("title").context("title is required")?, "title")?;
    let amount = parse_amount(sub.get_one::<String>("amount").context("amount is required")?)?;
    let r#type: TransactionType = sub
        .get_one::<String>("type")
        .context("type is required")?
        .parse()?;
    let category = non_empty(
        sub.get_one::<String>("category").context("category is required")?,
        "category",
    )?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today().format(crate::models::DATE_FORMAT).to_string(),
    };
    let note = sub.get_one::<String>("note").cloned().unwrap_or_default();

    if !r#type.suggested_categories().contains(&category.as_str()) {
        tracing::debug!(%category, "category is not one of the suggestions");
    }

    let transaction = Transaction::new(title, amount, r#type, category, date).with_note(note);
    let id = ctx.transactions.insert(transaction.clone()).await?;
    println!(
        "Recorded {} {} '{}' on {} (id {})",
        transaction.r#type,
        fmt_money(&transaction.amount),
        transaction.title,
        transaction.date,
        id
    );
    Ok(())
}

async fn edit(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    let Some(mut transaction) = find(ctx, id) else {
        println!("No transaction with id {}", id);
        return Ok(());
    };

    if let Some(title) = sub.get_one::<String>("title") {
        transaction.title = non_empty(title, "title")?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        transaction.amount = parse_amount(amount)?;
    }
    if let Some(r#type) = sub.get_one::<String>("type") {
        transaction.r#type = r#type.parse()?;
    }
    if let Some(category) = sub.get_one::<String>("category") {
        transaction.category = non_empty(category, "category")?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        transaction.date = parse_date(date)?;
    }
    if let Some(note) = sub.get_one::<String>("note") {
        transaction.note = note.clone();
    }

    if ctx.transactions.update(transaction).await? {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

async fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    match find(ctx, id) {
        Some(transaction) if ctx.transactions.delete(&transaction).await? => {
            println!("Removed '{}' (id {})", transaction.title, id);
        }
        _ => println!("No transaction with id {}", id),
    }
    Ok(())
}

pub fn query_rows(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let type_filter: TypeFilter = sub
        .get_one::<String>("type")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default();
    let query = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let window: TimeWindow = sub
        .get_one::<String>("window")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(TimeWindow::All);

    let snapshot = ctx.transactions.observe_all().latest();
    let windowed = filter_by_window(&snapshot, window, today());
    let mut rows = filter_by_type_and_text(&windowed, type_filter, query);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ctx, sub)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.clone(),
                    t.title.clone(),
                    t.r#type.to_string(),
                    fmt_money(&t.amount),
                    t.category.clone(),
                    t.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Type", "Amount", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
