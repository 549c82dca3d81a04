// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{RecordStore, SqliteStore};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

/// Finds stored rows that break the deal invariants.
pub fn check(store: &SqliteStore) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    for raw in store.raw_rows()? {
        let t = match raw.decode() {
            Ok(t) => t,
            Err(e) => {
                rows.push(vec!["corrupt_record".into(), e.to_string()]);
                continue;
            }
        };
        if t.original_price < Decimal::ZERO {
            rows.push(vec![
                "negative_original".into(),
                format!("#{} original {}", t.id, t.original_price),
            ]);
        }
        if t.selling_price <= t.original_price {
            rows.push(vec![
                "selling_not_above_original".into(),
                format!("#{} {} <= {}", t.id, t.selling_price, t.original_price),
            ]);
        }
        if t.profit != t.selling_price - t.original_price {
            rows.push(vec![
                "profit_mismatch".into(),
                format!(
                    "#{} profit {} != {} - {}",
                    t.id, t.profit, t.selling_price, t.original_price
                ),
            ]);
        }
        if t.profit_per_person != t.profit / Decimal::TWO {
            rows.push(vec![
                "split_mismatch".into(),
                format!("#{} each {} != {} / 2", t.id, t.profit_per_person, t.profit),
            ]);
        }
    }

    if let Some(cp) = store.latest_checkpoint()? {
        if cp.created_at > Utc::now() {
            rows.push(vec![
                "checkpoint_in_future".into(),
                format!("#{} at {}", cp.id, cp.created_at),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(store: &SqliteStore) -> Result<()> {
    let rows = check(store)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
