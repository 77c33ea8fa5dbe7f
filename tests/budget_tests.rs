// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tally::context::AppContext;
use tally::{LedgerStore, cli, commands::budgets};

async fn run(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("budget", budget_m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    budgets::handle(ctx, budget_m).await
}

#[tokio::test]
async fn set_then_replace_by_id() {
    let ctx = AppContext::new(LedgerStore::open_in_memory().unwrap())
        .await
        .unwrap();

    run(&ctx, &["tally", "budget", "set", "--category", "Food", "--amount", "1000", "--month", "2024-06"])
        .await
        .unwrap();
    let id = ctx.store.budgets_snapshot()[0].id.to_string();

    run(
        &ctx,
        &["tally", "budget", "set", "--category", "Food", "--amount", "1200", "--month", "2024-06", "--id", &id],
    )
    .await
    .unwrap();
    let budgets = ctx.store.budgets_snapshot();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, Decimal::from(1200));

    run(&ctx, &["tally", "budget", "rm", "--id", &id]).await.unwrap();
    assert!(ctx.store.budgets_snapshot().is_empty());
}

#[tokio::test]
async fn second_budget_for_a_category_is_allowed_but_flagged() {
    let ctx = AppContext::new(LedgerStore::open_in_memory().unwrap())
        .await
        .unwrap();
    for amount in ["100", "200"] {
        run(&ctx, &["tally", "budget", "set", "--category", "Food", "--amount", amount, "--month", "2024-06"])
            .await
            .unwrap();
    }
    assert_eq!(ctx.store.budgets_snapshot().len(), 2);
}

#[tokio::test]
async fn malformed_month_is_rejected() {
    let ctx = AppContext::new(LedgerStore::open_in_memory().unwrap())
        .await
        .unwrap();
    let result = run(
        &ctx,
        &["tally", "budget", "set", "--category", "Food", "--amount", "100", "--month", "June"],
    )
    .await;
    assert!(result.is_err());
    assert!(ctx.store.budgets_snapshot().is_empty());
}
