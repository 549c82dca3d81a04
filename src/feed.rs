// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Change notifications from the record store.
//!
//! Every subscriber gets its own bounded channel. A subscriber that falls
//! behind is cut off instead of silently losing events: its receiver reports
//! a disconnect, and it is expected to subscribe again and re-fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError, TrySendError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

use crate::models::{Checkpoint, Transaction};

/// Queue depth per subscriber.
pub const FEED_QUEUE_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChangeEvent {
    Inserted(Transaction),
    Updated(Transaction),
    Deleted { id: i64 },
    CheckpointCreated(Checkpoint),
}

impl ChangeEvent {
    pub fn transaction_id(&self) -> Option<i64> {
        match self {
            ChangeEvent::Inserted(tx) | ChangeEvent::Updated(tx) => Some(tx.id),
            ChangeEvent::Deleted { id } => Some(*id),
            ChangeEvent::CheckpointCreated(_) => None,
        }
    }
}

type Senders = Arc<Mutex<Vec<(u64, SyncSender<ChangeEvent>)>>>;

#[derive(Clone)]
pub struct ChangeFeed {
    senders: Senders,
    next_id: Arc<AtomicU64>,
    cut_off: Arc<AtomicU64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            cut_off: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::sync_channel(FEED_QUEUE_DEPTH);
        if let Ok(mut senders) = self.senders.lock() {
            senders.push((id, tx));
        }
        log::debug!("subscriber {} registered", id);
        Subscription {
            id,
            rx,
            feed: self.clone(),
        }
    }

    fn unregister(&self, id: u64) {
        if let Ok(mut senders) = self.senders.lock() {
            senders.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    pub fn publish(&self, event: ChangeEvent) {
        let Ok(mut senders) = self.senders.lock() else {
            return;
        };
        senders.retain(|(id, tx)| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.cut_off.fetch_add(1, Ordering::Relaxed);
                log::warn!("subscriber {} fell behind; disconnecting", id);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Drops every subscriber. Their receivers report a disconnect.
    pub fn close(&self) {
        if let Ok(mut senders) = self.senders.lock() {
            senders.clear();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Subscribers disconnected for falling behind.
    pub fn cut_off_count(&self) -> u64 {
        self.cut_off.load(Ordering::Relaxed)
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Events pulled off a subscription in one go.
#[derive(Debug, Default)]
pub struct Drained {
    pub events: Vec<ChangeEvent>,
    pub disconnected: bool,
}

/// The feed dropped this subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

pub struct Subscription {
    id: u64,
    rx: Receiver<ChangeEvent>,
    feed: ChangeFeed,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Takes everything queued without blocking.
    pub fn drain(&self) -> Drained {
        let mut out = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(event) => out.events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    out.disconnected = true;
                    break;
                }
            }
        }
        out
    }

    /// Waits up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Result<Option<ChangeEvent>, Disconnected> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Disconnected),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.feed.unregister(self.id);
    }
}
