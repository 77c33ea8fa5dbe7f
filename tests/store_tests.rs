// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tally::LedgerStore;
use tally::aggregation::compute_balances;
use tally::models::{Budget, Transaction, TransactionType};
use tally::repository::{BudgetRepository, TransactionRepository};

fn lunch() -> Transaction {
    Transaction::new(
        "Lunch",
        Decimal::from(250),
        TransactionType::Expense,
        "Food",
        "2024-06-01",
    )
}

fn salary() -> Transaction {
    Transaction::new(
        "Salary",
        Decimal::from(50000),
        TransactionType::Income,
        "Salary",
        "2024-06-01",
    )
}

#[tokio::test]
async fn insert_assigns_ids_and_round_trips() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store.clone());

    let mut expected = lunch().with_note("with the team");
    let id = repo.insert(expected.clone()).await.unwrap();
    assert!(id > 0);
    expected.id = id;

    let snapshot = store.transactions_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(&snapshot[0], &expected);

    let second = repo.insert(salary()).await.unwrap();
    assert!(second > id);
}

#[tokio::test]
async fn subscription_latest_is_current_without_recv() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store);
    let mut feed = repo.observe_all();

    repo.insert(lunch()).await.unwrap();
    let latest = feed.latest();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].title, "Lunch");

    repo.insert(salary()).await.unwrap();
    assert_eq!(feed.latest().len(), 2);
    assert!(feed.try_recv().is_none());
}

#[tokio::test]
async fn insert_with_existing_id_replaces_the_row() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store.clone());

    let id = repo.insert(lunch()).await.unwrap();
    let mut replacement = lunch();
    replacement.id = id;
    replacement.title = "Dinner".into();
    assert_eq!(repo.insert(replacement).await.unwrap(), id);

    let snapshot = store.transactions_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "Dinner");
}

#[tokio::test]
async fn snapshot_is_newest_date_first_then_newest_id() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store.clone());

    let mut a = lunch();
    a.date = "2024-06-01".into();
    let mut b = lunch();
    b.date = "2024-06-03".into();
    let mut c = lunch();
    c.date = "2024-06-01".into();
    let id_a = repo.insert(a).await.unwrap();
    let id_b = repo.insert(b).await.unwrap();
    let id_c = repo.insert(c).await.unwrap();

    let ids: Vec<i64> = store.transactions_snapshot().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![id_b, id_c, id_a]);
}

#[tokio::test]
async fn scenario_balances_after_two_inserts() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store);
    repo.insert(lunch()).await.unwrap();
    repo.insert(salary()).await.unwrap();

    let balances = compute_balances(&repo.observe_all().latest());
    assert_eq!(balances.income, Decimal::from(50000));
    assert_eq!(balances.expense, Decimal::from(250));
    assert_eq!(balances.balance, Decimal::from(49750));
}

#[tokio::test]
async fn subscribers_see_every_mutation_in_order() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store);
    let mut feed = repo.observe_all();

    assert!(feed.recv().await.unwrap().is_empty());

    repo.insert(lunch()).await.unwrap();
    repo.insert(salary()).await.unwrap();
    assert_eq!(feed.recv().await.unwrap().len(), 1);
    assert_eq!(feed.recv().await.unwrap().len(), 2);
    assert!(feed.try_recv().is_none());
}

#[tokio::test]
async fn deleting_lunch_removes_it_from_the_next_emission() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store);
    repo.insert(lunch()).await.unwrap();
    repo.insert(salary()).await.unwrap();

    let mut feed = repo.observe_all();
    let current = feed.recv().await.unwrap();
    let target = current.iter().find(|t| t.title == "Lunch").unwrap().clone();
    assert!(repo.delete(&target).await.unwrap());

    let after = feed.recv().await.unwrap();
    assert!(after.iter().all(|t| t.title != "Lunch"));
    assert_eq!(compute_balances(&after).expense, Decimal::ZERO);
}

#[tokio::test]
async fn no_op_mutations_do_not_publish() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store);
    let mut feed = repo.observe_all();
    feed.recv().await.unwrap();

    let mut ghost = lunch();
    ghost.id = 4242;
    assert!(!repo.update(ghost.clone()).await.unwrap());
    assert!(!repo.delete(&ghost).await.unwrap());
    assert_eq!(repo.delete_all().await.unwrap(), 0);
    assert!(feed.try_recv().is_none());
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store.clone());
    let id = repo.insert(lunch()).await.unwrap();

    let mut edited = Transaction::new(
        "Groceries",
        Decimal::new(1999, 2),
        TransactionType::Expense,
        "Shopping",
        "2024-06-02",
    );
    edited.id = id;
    assert!(repo.update(edited.clone()).await.unwrap());
    assert_eq!(store.transactions_snapshot()[0], edited);
}

#[tokio::test]
async fn delete_all_clears_and_reports_count() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = TransactionRepository::new(store.clone());
    repo.insert(lunch()).await.unwrap();
    repo.insert(salary()).await.unwrap();

    assert_eq!(repo.delete_all().await.unwrap(), 2);
    assert!(store.transactions_snapshot().is_empty());
}

#[tokio::test]
async fn budgets_feed_is_scoped_to_one_month() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = BudgetRepository::new(store.clone());
    let mut june = repo.budgets_for_month("2024-06");
    assert!(june.recv().await.unwrap().is_empty());

    repo.insert_or_update(Budget::new("Food", Decimal::from(1000), "2024-06"))
        .await
        .unwrap();
    repo.insert_or_update(Budget::new("Food", Decimal::from(800), "2024-07"))
        .await
        .unwrap();

    assert_eq!(june.recv().await.unwrap().len(), 1);
    let second = june.recv().await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].month, "2024-06");
    assert_eq!(store.budgets_snapshot().len(), 2);
}

#[tokio::test]
async fn budget_upsert_with_id_replaces() {
    let store = LedgerStore::open_in_memory().unwrap();
    let repo = BudgetRepository::new(store.clone());
    let id = repo
        .insert_or_update(Budget::new("Food", Decimal::from(1000), "2024-06"))
        .await
        .unwrap();

    let mut raised = Budget::new("Food", Decimal::from(1200), "2024-06");
    raised.id = id;
    assert_eq!(repo.insert_or_update(raised).await.unwrap(), id);

    let budgets = store.budgets_snapshot();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, Decimal::from(1200));

    assert!(repo.delete(&budgets[0]).await.unwrap());
    assert!(store.budgets_snapshot().is_empty());
}

#[tokio::test]
async fn reopening_a_file_reloads_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let store = LedgerStore::open(&path).unwrap();
        TransactionRepository::new(store).insert(lunch()).await.unwrap();
    }

    let store = LedgerStore::open(&path).unwrap();
    let snapshot = store.transactions_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "Lunch");
}
