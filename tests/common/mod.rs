// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use profitsplit::live::LiveView;
use profitsplit::models::Transaction;
use profitsplit::store::SqliteStore;
use rust_decimal::Decimal;

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// A transaction with derived fields filled in the same way the calculator does.
pub fn make_tx(id: i64, created_at: DateTime<Utc>, original: i64, selling: i64) -> Transaction {
    let original = Decimal::from(original);
    let selling = Decimal::from(selling);
    let profit = selling - original;
    Transaction {
        id,
        created_at,
        original_price: original,
        selling_price: selling,
        profit,
        profit_per_person: profit / Decimal::TWO,
        note: None,
    }
}

/// One transaction per profit value, an hour apart starting at `start`.
pub fn with_profits(start: DateTime<Utc>, profits: &[i64]) -> Vec<Transaction> {
    profits
        .iter()
        .enumerate()
        .map(|(i, p)| {
            make_tx(
                i as i64 + 1,
                start + chrono::Duration::hours(i as i64),
                0,
                *p,
            )
        })
        .collect()
}

pub fn store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

pub fn view() -> LiveView<SqliteStore> {
    LiveView::open(store()).unwrap()
}
