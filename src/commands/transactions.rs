// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amount::parse_amount;
use crate::commands::{View, required};
use crate::error::SplitError;
use crate::models::TransactionPatch;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    day_bounds, fmt_amount, fmt_local, maybe_print_json, minute_bounds, parse_date, parse_time,
    parse_timestamp, pretty_table,
};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(view: &mut View, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(view, sub)?,
        Some(("list", sub)) => list(view, sub)?,
        Some(("edit", sub)) => edit(view, sub)?,
        Some(("rm", _)) | Some(("purge", _)) => {
            handle_deletes(view.store(), m)?;
            view.poll()?;
        }
        _ => {}
    }
    Ok(())
}

/// Runs `tx rm` and `tx purge` straight against the store. Neither needs the
/// history decoded, so they still work when a stored row is corrupt. Returns
/// false for any other subcommand.
pub fn handle_deletes(store: &SqliteStore, m: &clap::ArgMatches) -> Result<bool> {
    match m.subcommand() {
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("purge", sub)) => purge(store, sub)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Adds a hint to store failures: the write may have landed anyway.
fn explain(e: SplitError) -> anyhow::Error {
    if e.is_retryable() {
        anyhow::Error::new(e)
            .context("Could not reach the database; the change may still have been saved. Check `tx list` and retry")
    } else {
        anyhow::Error::new(e)
    }
}

fn add(view: &mut View, sub: &clap::ArgMatches) -> Result<()> {
    let original = required(sub, "original")?;
    let selling = required(sub, "selling")?;
    let note = sub.get_one::<String>("note").map(String::as_str).unwrap_or("");
    let at = match sub.get_one::<String>("at") {
        Some(s) => parse_timestamp(s)?,
        None => Utc::now(),
    };

    let tx = view
        .submit_at(original, selling, note, at)
        .map_err(explain)?;
    println!(
        "Recorded deal #{}: bought {} sold {} profit {} ({} each)",
        tx.id,
        fmt_amount(&tx.original_price),
        fmt_amount(&tx.selling_price),
        fmt_amount(&tx.profit),
        fmt_amount(&tx.profit_per_person)
    );
    Ok(())
}

fn list(view: &mut View, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(view, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    fmt_local(&r.created_at),
                    fmt_amount(&r.original_price),
                    fmt_amount(&r.selling_price),
                    fmt_amount(&r.profit),
                    fmt_amount(&r.profit_per_person),
                    r.note.clone().unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Time", "Original", "Selling", "Profit", "Each", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub original_price: Decimal,
    pub selling_price: Decimal,
    pub profit: Decimal,
    pub profit_per_person: Decimal,
    pub note: Option<String>,
}

pub fn query_rows(view: &View, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let day = match sub.get_one::<String>("date") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };
    let selected: Vec<_> = match day {
        Some(d) => view.on_day(d, &Local),
        None => view.transactions().iter().collect(),
    };

    let rows = selected.into_iter().map(|t| TransactionRow {
        id: t.id,
        created_at: t.created_at,
        original_price: t.original_price,
        selling_price: t.selling_price,
        profit: t.profit,
        profit_per_person: t.profit_per_person,
        note: t.note.clone(),
    });

    let data = match sub.get_one::<usize>("limit") {
        Some(&limit) => {
            let page = sub.get_one::<usize>("page").copied().unwrap_or(1);
            if page == 0 {
                return Err(anyhow!("--page starts at 1"));
            }
            rows.skip((page - 1) * limit).take(limit).collect()
        }
        None => rows.collect(),
    };
    Ok(data)
}

fn edit(view: &mut View, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("Missing required argument '--id'"))?;
    let mut patch = TransactionPatch::default();
    if let Some(o) = sub.get_one::<String>("original") {
        patch.original_price = Some(parse_amount(o)?);
    }
    if let Some(s) = sub.get_one::<String>("selling") {
        patch.selling_price = Some(parse_amount(s)?);
    }
    if let Some(n) = sub.get_one::<String>("note") {
        patch.note = Some(Some(n.clone()));
    } else if sub.get_flag("clear-note") {
        patch.note = Some(None);
    }
    if patch.is_empty() {
        return Err(anyhow!("Nothing to change; pass --original, --selling, --note or --clear-note"));
    }

    let tx = view.edit(id, &patch).map_err(explain)?;
    println!(
        "Updated deal #{}: profit {} ({} each)",
        tx.id,
        fmt_amount(&tx.profit),
        fmt_amount(&tx.profit_per_person)
    );
    Ok(())
}

fn remove(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("Missing required argument '--id'"))?;
    store.delete(id).map_err(explain)?;
    println!("Deleted deal #{}", id);
    Ok(())
}

fn purge(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let day = parse_date(required(sub, "date")?)?;
    let (start, end, what) = match sub.get_one::<String>("time") {
        Some(t) => {
            let time = parse_time(t)?;
            let (s, e) = minute_bounds(&Local, day, time)?;
            (s, e, format!("at {} on {}", time.format("%H:%M"), day))
        }
        None => {
            let (s, e) = day_bounds(&Local, day)?;
            (s, e, format!("on {}", day))
        }
    };
    let ids = store.delete_between(start, end).map_err(explain)?;
    log::info!("purged {} deals {}", ids.len(), what);
    println!("Deleted {} deal(s) {}", ids.len(), what);
    Ok(())
}
