// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::AppContext;
use crate::models::Budget;
use crate::reports::{BudgetBoard, progress_percent};
use crate::repository::budgets::available_budget_categories;
use crate::utils::{
    current_month, fmt_money, fmt_percent, maybe_print_json, non_empty, parse_amount, parse_month,
    pretty_table,
};
use anyhow::{Context, Result};

pub async fn handle(ctx: &AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ctx, sub).await?,
        Some(("rm", sub)) => rm(ctx, sub).await?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("clear", _)) => {
            let removed = ctx.budgets.delete_all().await?;
            println!("Removed {} budgets", removed);
        }
        Some(("categories", sub)) => categories(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_from(sub: &clap::ArgMatches) -> Result<String> {
    Ok(match sub.get_one::<String>("month") {
        Some(month) => parse_month(month)?,
        None => current_month(),
    })
}

async fn set(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_from(sub)?;
    let category = non_empty(
        sub.get_one::<String>("category").context("category is required")?,
        "category",
    )?;
    let amount = parse_amount(sub.get_one::<String>("amount").context("amount is required")?)?;

    let mut budget = Budget::new(category, amount, month);
    match sub.get_one::<i64>("id") {
        Some(id) => budget.id = *id,
        None => {
            let existing = ctx.budgets.budgets_for_month(&budget.month).latest();
            if existing.iter().any(|b| b.category == budget.category) {
                tracing::warn!(
                    category = %budget.category,
                    month = %budget.month,
                    "category already has a budget this month"
                );
                println!(
                    "Note: {} already has a budget for {}; pass --id to replace it",
                    budget.category, budget.month
                );
            }
        }
    }

    let id = ctx.budgets.insert_or_update(budget.clone()).await?;
    println!(
        "Budget set for {} / {} = {} (id {})",
        budget.month,
        budget.category,
        fmt_money(&budget.amount),
        id
    );
    Ok(())
}

async fn rm(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    let budget = ctx
        .store
        .budgets_snapshot()
        .iter()
        .find(|b| b.id == id)
        .cloned();
    match budget {
        Some(budget) if ctx.budgets.delete(&budget).await? => {
            println!("Removed budget for {} / {}", budget.month, budget.category);
        }
        _ => println!("No budget with id {}", id),
    }
    Ok(())
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_from(sub)?;
    let overview = BudgetBoard::new(&month, &ctx.transactions, &ctx.budgets).current();
    if maybe_print_json(sub.get_flag("json"), &overview)? {
        return Ok(());
    }

    let data: Vec<Vec<String>> = overview
        .budgets
        .iter()
        .map(|s| {
            vec![
                s.budget.id.to_string(),
                s.budget.category.clone(),
                fmt_money(&s.budget.amount),
                fmt_money(&s.spent),
                fmt_money(&s.remaining()),
                fmt_percent(&s.percentage()),
                format!("{:>3}%", progress_percent(s.percentage())),
                if s.is_over_budget() { "over".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Category", "Budget", "Spent", "Remaining", "Used", "Progress", ""],
            data,
        )
    );
    println!(
        "{}: spent {} of {} ({}, {} left) [{:?}]",
        overview.month,
        fmt_money(&overview.overall.total_spent),
        fmt_money(&overview.overall.total_budget),
        fmt_percent(&overview.overall.overall_percentage),
        fmt_money(&overview.overall.remaining),
        overview.health()
    );
    Ok(())
}

fn categories(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_from(sub)?;
    let budgets = ctx.budgets.budgets_for_month(&month).latest();
    let available = available_budget_categories(&budgets);
    if available.is_empty() {
        println!("Every category has a budget for {}", month);
    } else {
        for category in available {
            println!("{}", category);
        }
    }
    Ok(())
}
