// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local view of the history, kept in step with the record store.
//!
//! Writes go to the store first and touch the local list only once the store
//! acknowledged them. Change events are applied by id, so duplicates and
//! reordering are harmless; ids seen deleted stay deleted until the next
//! fetch, since the store never reuses them. When the subscription drops, or a write fails in
//! a way that may have half-succeeded, the whole history is fetched again.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::calculator::compute_transaction;
use crate::dashboard::Dashboard;
use crate::error::{Result, SplitError};
use crate::feed::{ChangeEvent, Subscription};
use crate::models::{Checkpoint, Transaction, TransactionPatch};
use crate::store::RecordStore;

pub struct LiveView<S: RecordStore> {
    store: S,
    subscription: Subscription,
    transactions: Vec<Transaction>,
    deleted: HashSet<i64>,
    checkpoint: Option<Checkpoint>,
}

impl<S: RecordStore> LiveView<S> {
    /// Subscribes first, then loads, so nothing written in between is missed.
    pub fn open(store: S) -> Result<Self> {
        let subscription = store.subscribe();
        let mut view = LiveView {
            store,
            subscription,
            transactions: Vec::new(),
            deleted: HashSet::new(),
            checkpoint: None,
        };
        view.refetch()?;
        Ok(view)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref()
    }

    pub fn refetch(&mut self) -> Result<()> {
        self.transactions = self.store.query_all()?;
        self.deleted.clear();
        self.checkpoint = self.store.latest_checkpoint()?;
        log::debug!("fetched {} transactions", self.transactions.len());
        Ok(())
    }

    /// Applies one change event. Applying the same event twice is a no-op.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(tx) | ChangeEvent::Updated(tx) => self.upsert(tx),
            ChangeEvent::Deleted { id } => self.forget(&[id]),
            ChangeEvent::CheckpointCreated(cp) => {
                let newer = self
                    .checkpoint
                    .as_ref()
                    .is_none_or(|cur| (cp.created_at, cp.id) >= (cur.created_at, cur.id));
                if newer {
                    self.checkpoint = Some(cp);
                }
            }
        }
    }

    fn upsert(&mut self, tx: Transaction) {
        if self.deleted.contains(&tx.id) {
            log::debug!("ignoring late event for deleted transaction {}", tx.id);
            return;
        }
        match self.transactions.iter_mut().find(|t| t.id == tx.id) {
            Some(slot) => *slot = tx,
            None => self.transactions.push(tx),
        }
        self.transactions
            .sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    }

    fn forget(&mut self, ids: &[i64]) {
        self.deleted.extend(ids.iter().copied());
        self.transactions.retain(|t| !ids.contains(&t.id));
    }

    /// Applies everything queued. If the feed dropped us, subscribes again
    /// and re-fetches. Returns the number of events applied.
    pub fn poll(&mut self) -> Result<usize> {
        let drained = self.subscription.drain();
        let applied = drained.events.len();
        for event in drained.events {
            self.apply(event);
        }
        if drained.disconnected {
            log::info!("change feed disconnected; resubscribing and re-fetching");
            self.resync()?;
        }
        Ok(applied)
    }

    pub fn resync(&mut self) -> Result<()> {
        self.subscription = self.store.subscribe();
        self.refetch()
    }

    /// After a store failure the write may still have landed, so reload
    /// before reporting the error.
    fn reconcile_after(&mut self, err: SplitError) -> SplitError {
        if err.is_retryable() {
            log::warn!("store write failed ({}); re-fetching", err);
            if let Err(e) = self.refetch() {
                log::warn!("re-fetch after failure also failed: {}", e);
            }
        }
        err
    }

    pub fn submit(&mut self, original: &str, selling: &str, note: &str) -> Result<Transaction> {
        self.submit_at(original, selling, note, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        original: &str,
        selling: &str,
        note: &str,
        at: DateTime<Utc>,
    ) -> Result<Transaction> {
        let draft = compute_transaction(original, selling, note)?;
        match self.store.insert_at(&draft, at) {
            Ok(tx) => {
                self.upsert(tx.clone());
                Ok(tx)
            }
            Err(e) => Err(self.reconcile_after(e)),
        }
    }

    pub fn edit(&mut self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        match self.store.update(id, patch) {
            Ok(tx) => {
                self.upsert(tx.clone());
                Ok(tx)
            }
            Err(e) => Err(self.reconcile_after(e)),
        }
    }

    pub fn remove(&mut self, id: i64) -> Result<()> {
        match self.store.delete(id) {
            Ok(()) => {
                self.forget(&[id]);
                Ok(())
            }
            Err(e) => Err(self.reconcile_after(e)),
        }
    }

    pub fn purge(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<i64>> {
        match self.store.delete_between(start, end) {
            Ok(ids) => {
                self.forget(&ids);
                Ok(ids)
            }
            Err(e) => Err(self.reconcile_after(e)),
        }
    }

    /// Starts a new accounting period for the party totals.
    pub fn reset_totals(&mut self, at: DateTime<Utc>) -> Result<Checkpoint> {
        match self.store.insert_checkpoint(at) {
            Ok(cp) => {
                self.apply(ChangeEvent::CheckpointCreated(cp.clone()));
                Ok(cp)
            }
            Err(e) => Err(self.reconcile_after(e)),
        }
    }

    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Dashboard {
        Dashboard::project(
            &self.transactions,
            self.checkpoint.as_ref().map(|c| c.created_at),
            now,
        )
    }

    /// Transactions made on `day` in the timezone of `tz`.
    pub fn on_day<Tz: TimeZone>(&self, day: chrono::NaiveDate, tz: &Tz) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.created_at.with_timezone(tz).date_naive() == day)
            .collect()
    }
}
