// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use chrono::SubsecRound;
use profitsplit::calculator::compute_transaction;
use profitsplit::error::SplitError;
use profitsplit::feed::{ChangeEvent, ChangeFeed, FEED_QUEUE_DEPTH};
use profitsplit::models::{TransactionDraft, TransactionPatch};
use profitsplit::store::RecordStore;
use rusqlite::params;
use rust_decimal_macros::dec;

mod common;
use common::{at, store};

fn draft(o: &str, s: &str) -> TransactionDraft {
    compute_transaction(o, s, "").unwrap()
}

#[test]
fn query_all_returns_newest_first() {
    let st = store();
    st.insert_at(&draft("1", "2"), at(2026, 1, 1, 9, 0)).unwrap();
    st.insert_at(&draft("1", "3"), at(2026, 1, 3, 9, 0)).unwrap();
    st.insert_at(&draft("1", "4"), at(2026, 1, 2, 9, 0)).unwrap();

    let all = st.query_all().unwrap();
    let profits: Vec<_> = all.iter().map(|t| t.profit).collect();
    assert_eq!(profits, [dec!(2000), dec!(3000), dec!(1000)]);
}

#[test]
fn same_instant_orders_by_id() {
    let st = store();
    let t = at(2026, 1, 1, 9, 0);
    let a = st.insert_at(&draft("1", "2"), t).unwrap();
    let b = st.insert_at(&draft("1", "3"), t).unwrap();
    let all = st.query_all().unwrap();
    assert_eq!(all[0].id, b.id);
    assert_eq!(all[1].id, a.id);
}

#[test]
fn insert_round_trips_through_sqlite() {
    let st = store();
    let now = chrono::Utc::now();
    let tx = st
        .insert_at(&compute_transaction("12.5", "20", "note").unwrap(), now)
        .unwrap();
    assert_eq!(tx.created_at, now.trunc_subsecs(6));
    assert_eq!(st.get(tx.id).unwrap(), tx);
}

#[test]
fn insert_rejects_tampered_draft() {
    let st = store();
    let mut d = draft("1", "3");
    d.profit_per_person = dec!(1);
    assert!(matches!(st.insert(&d), Err(SplitError::InvalidAmount(_))));

    let mut d = draft("1", "3");
    d.selling_price = dec!(500);
    assert!(matches!(
        st.insert(&d),
        Err(SplitError::InvalidOrdering { .. })
    ));
    assert!(st.query_all().unwrap().is_empty());
}

#[test]
fn update_rederives_and_validates() {
    let st = store();
    let tx = st.insert(&draft("10", "20")).unwrap();

    let patch = TransactionPatch {
        selling_price: Some(dec!(30000)),
        note: Some(Some(" upsold ".into())),
        ..Default::default()
    };
    let updated = st.update(tx.id, &patch).unwrap();
    assert_eq!(updated.profit, dec!(20000));
    assert_eq!(updated.profit_per_person, dec!(10000));
    assert_eq!(updated.note.as_deref(), Some("upsold"));
    assert_eq!(updated.created_at, tx.created_at);
    assert_eq!(st.get(tx.id).unwrap(), updated);

    let bad = TransactionPatch {
        selling_price: Some(dec!(5000)),
        ..Default::default()
    };
    assert!(matches!(
        st.update(tx.id, &bad),
        Err(SplitError::InvalidOrdering { .. })
    ));
    assert_eq!(st.get(tx.id).unwrap(), updated);
}

#[test]
fn missing_ids_are_not_found() {
    let st = store();
    assert!(matches!(st.delete(42), Err(SplitError::NotFound(42))));
    assert!(matches!(st.get(42), Err(SplitError::NotFound(42))));
    assert!(matches!(
        st.update(42, &TransactionPatch::default()),
        Err(SplitError::NotFound(42))
    ));
}

#[test]
fn delete_removes_one() {
    let st = store();
    let a = st.insert(&draft("1", "2")).unwrap();
    let b = st.insert(&draft("1", "3")).unwrap();
    st.delete(a.id).unwrap();
    let ids: Vec<_> = st.query_all().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, [b.id]);
}

#[test]
fn delete_between_is_inclusive() {
    let st = store();
    st.insert_at(&draft("1", "2"), at(2026, 2, 1, 8, 59)).unwrap();
    let hit1 = st.insert_at(&draft("1", "2"), at(2026, 2, 1, 9, 0)).unwrap();
    let hit2 = st.insert_at(&draft("1", "2"), at(2026, 2, 1, 10, 0)).unwrap();
    st.insert_at(&draft("1", "2"), at(2026, 2, 1, 10, 1)).unwrap();

    let ids = st
        .delete_between(at(2026, 2, 1, 9, 0), at(2026, 2, 1, 10, 0))
        .unwrap();
    assert_eq!(ids, [hit1.id, hit2.id]);
    assert_eq!(st.query_all().unwrap().len(), 2);
    assert!(st
        .delete_between(at(2026, 2, 1, 9, 0), at(2026, 2, 1, 10, 0))
        .unwrap()
        .is_empty());
}

#[test]
fn latest_checkpoint_wins() {
    let st = store();
    assert!(st.latest_checkpoint().unwrap().is_none());
    st.insert_checkpoint(at(2026, 2, 1, 9, 0)).unwrap();
    let newer = st.insert_checkpoint(at(2026, 2, 5, 9, 0)).unwrap();
    // inserted later but older instant
    st.insert_checkpoint(at(2026, 2, 3, 9, 0)).unwrap();
    assert_eq!(st.latest_checkpoint().unwrap(), Some(newer));
}

#[test]
fn writes_are_announced() {
    let st = store();
    let sub = st.subscribe();
    let tx = st.insert(&draft("1", "2")).unwrap();
    let cp = st.insert_checkpoint(at(2026, 2, 1, 9, 0)).unwrap();
    st.delete(tx.id).unwrap();

    let drained = sub.drain();
    assert!(!drained.disconnected);
    assert_eq!(
        drained.events,
        vec![
            ChangeEvent::Inserted(tx.clone()),
            ChangeEvent::CheckpointCreated(cp),
            ChangeEvent::Deleted { id: tx.id },
        ]
    );
}

#[test]
fn rejected_writes_are_not_announced() {
    let st = store();
    let sub = st.subscribe();
    let _ = st.delete(7);
    let mut d = draft("1", "2");
    d.profit = dec!(1);
    let _ = st.insert(&d);
    assert!(sub.drain().events.is_empty());
}

#[test]
fn corrupt_rows_surface_as_errors() {
    let st = store();
    st.conn()
        .execute(
            "INSERT INTO transactions(created_at, original_price, selling_price, profit, profit_per_person)
             VALUES (?1, 'abc', '2', '1', '0.5')",
            params!["2026-01-01T00:00:00.000000Z"],
        )
        .unwrap();
    assert!(matches!(
        st.query_all(),
        Err(SplitError::CorruptRecord { .. })
    ));
    assert_eq!(st.raw_rows().unwrap().len(), 1);
}

#[test]
fn slow_subscriber_is_cut_off() {
    let feed = ChangeFeed::new();
    let slow = feed.subscribe();
    for id in 0..=FEED_QUEUE_DEPTH as i64 {
        feed.publish(ChangeEvent::Deleted { id });
    }
    assert_eq!(feed.cut_off_count(), 1);
    assert_eq!(feed.subscriber_count(), 0);

    let drained = slow.drain();
    assert_eq!(drained.events.len(), FEED_QUEUE_DEPTH);
    assert!(drained.disconnected);
}

#[test]
fn dropped_subscription_unregisters() {
    let feed = ChangeFeed::new();
    let a = feed.subscribe();
    let b = feed.subscribe();
    assert_ne!(a.id(), b.id());
    drop(a);
    assert_eq!(feed.subscriber_count(), 1);
    feed.publish(ChangeEvent::Deleted { id: 1 });
    assert_eq!(
        b.next_timeout(Duration::from_millis(10)),
        Ok(Some(ChangeEvent::Deleted { id: 1 }))
    );
    assert_eq!(b.next_timeout(Duration::from_millis(10)), Ok(None));
    feed.close();
    assert!(b.next_timeout(Duration::from_millis(10)).is_err());
}

#[test]
fn change_events_serialize_with_tag() {
    let v = serde_json::to_value(ChangeEvent::Deleted { id: 3 }).unwrap();
    assert_eq!(v["event"], "deleted");
    assert_eq!(v["id"], 3);
    assert_eq!(ChangeEvent::Deleted { id: 3 }.transaction_id(), Some(3));
}
