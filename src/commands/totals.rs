// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::View;
use crate::settings::Settings;
use crate::stats::party_totals;
use crate::utils::{fmt_amount, fmt_local, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn reset(view: &mut View) -> Result<()> {
    let cp = view.reset_totals(Utc::now())?;
    println!(
        "Totals reset; the new period starts {}",
        fmt_local(&cp.created_at)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PartyLine {
    pub name: String,
    pub total: Decimal,
    pub basis: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TotalsReport {
    pub since: Option<DateTime<Utc>>,
    pub party_a: PartyLine,
    pub party_b: PartyLine,
}

pub fn report(view: &View) -> Result<TotalsReport> {
    let settings = Settings::load(view.store().conn())?;
    let since = view.checkpoint().map(|c| c.created_at);
    let totals = party_totals(view.transactions(), since);
    Ok(TotalsReport {
        since,
        party_a: PartyLine {
            name: settings.party_a,
            total: totals.party_a,
            basis: "original + profit/2",
        },
        party_b: PartyLine {
            name: settings.party_b,
            total: totals.party_b,
            basis: "profit/2",
        },
    })
}

pub fn handle(view: &View, m: &clap::ArgMatches) -> Result<()> {
    let r = report(view)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    match r.since {
        Some(at) => println!("Period since {}", fmt_local(&at)),
        None => println!("Period: all time"),
    }
    let rows = [&r.party_a, &r.party_b]
        .iter()
        .map(|p| vec![p.name.clone(), fmt_amount(&p.total), p.basis.to_string()])
        .collect();
    println!("{}", pretty_table(&["Partner", "Total", "Basis"], rows));
    Ok(())
}
