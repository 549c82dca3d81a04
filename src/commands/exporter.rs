// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{View, required};
use crate::store::format_ts;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(view: &View, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(view, sub),
        _ => Ok(()),
    }
}

fn export_transactions(view: &View, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    // oldest first, like a ledger
    let mut txs: Vec<_> = view.transactions().iter().collect();
    txs.sort_by_key(|t| (t.created_at, t.id));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "created_at",
                "original_price",
                "selling_price",
                "profit",
                "profit_per_person",
                "note",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    format_ts(&t.created_at),
                    t.original_price.to_string(),
                    t.selling_price.to_string(),
                    t.profit.to_string(),
                    t.profit_per_person.to_string(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "created_at": format_ts(&t.created_at),
                        "original_price": t.original_price.to_string(),
                        "selling_price": t.selling_price.to_string(),
                        "profit": t.profit.to_string(),
                        "profit_per_person": t.profit_per_person.to_string(),
                        "note": t.note,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
