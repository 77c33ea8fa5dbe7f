// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Replay-latest snapshot feeds.
//!
//! A feed caches the most recent full snapshot of one record kind and keeps one
//! unbounded channel per subscriber. New subscribers get the cached snapshot
//! first, then every later publish in the order it happened. Nothing is
//! coalesced, so a slow subscriber sees each snapshot eventually.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

/// A complete, consistent collection of all records of one kind.
pub type Snapshot<T> = Arc<Vec<T>>;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

pub struct SnapshotFeed<T> {
    state: Mutex<FeedState<T>>,
}

struct FeedState<T> {
    latest: Snapshot<T>,
    subscribers: Vec<mpsc::UnboundedSender<Snapshot<T>>>,
}

impl<T> SnapshotFeed<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            state: Mutex::new(FeedState {
                latest: Arc::new(initial),
                subscribers: Vec::new(),
            }),
        }
    }

    // The state is replaced wholesale on every publish, so a poisoned lock
    // still guards a consistent snapshot.
    fn lock(&self) -> MutexGuard<'_, FeedState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the cached snapshot and send it to every live subscriber.
    /// Subscribers whose handle has been dropped are removed.
    pub fn publish(&self, snapshot: Vec<T>) {
        let snapshot = Arc::new(snapshot);
        let mut state = self.lock();
        state.latest = Arc::clone(&snapshot);
        state
            .subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        tracing::debug!(
            records = snapshot.len(),
            subscribers = state.subscribers.len(),
            "published snapshot"
        );
    }

    pub fn latest(&self) -> Snapshot<T> {
        Arc::clone(&self.lock().latest)
    }

    /// Number of subscribers that were alive at the last publish or subscribe.
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        let latest = Arc::clone(&state.latest);
        // The receiver is alive, so this send cannot fail.
        let _ = tx.send(Arc::clone(&latest));
        state.subscribers.push(tx);

        Subscription {
            rx,
            filter: None,
            latest,
        }
    }
}

/// A handle on a feed. Dropping it detaches permanently.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<Snapshot<T>>,
    filter: Option<Predicate<T>>,
    latest: Snapshot<T>,
}

impl<T: Clone> Subscription<T> {
    /// Only deliver the records matching `predicate`.
    pub fn filtered(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        let predicate: Predicate<T> = Arc::new(predicate);
        self.latest = Arc::new(apply(&predicate, &self.latest));
        self.filter = Some(predicate);
        self
    }

    fn accept(&mut self, snapshot: Snapshot<T>) -> Snapshot<T> {
        let snapshot = match &self.filter {
            Some(predicate) => Arc::new(apply(predicate, &snapshot)),
            None => snapshot,
        };
        self.latest = Arc::clone(&snapshot);
        snapshot
    }

    /// Wait for the next snapshot. The first call returns the snapshot that was
    /// current when the subscription was made.
    ///
    /// Returns `None` once the feed has been dropped and every queued snapshot
    /// has been delivered.
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        let snapshot = self.rx.recv().await?;
        Some(self.accept(snapshot))
    }

    /// The next queued snapshot, if one is waiting.
    pub fn try_recv(&mut self) -> Option<Snapshot<T>> {
        let snapshot = self.rx.try_recv().ok()?;
        Some(self.accept(snapshot))
    }

    /// The most recent snapshot, without waiting.
    ///
    /// Everything queued is consumed, so a following `recv` waits for the next
    /// publish.
    pub fn latest(&mut self) -> Snapshot<T> {
        while self.try_recv().is_some() {}
        Arc::clone(&self.latest)
    }
}

fn apply<T: Clone>(predicate: &Predicate<T>, records: &[T]) -> Vec<T> {
    records.iter().filter(|r| predicate(*r)).cloned().collect()
}
