// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::View;
use crate::stats::{Period, UserStats, period_counts, profit_series, profit_since};
use crate::utils::{fmt_amount, fmt_local, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, Months, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const BAR_WIDTH: usize = 30;

pub fn handle(view: &View, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(view, sub)?,
        Some(("periods", sub)) => periods(view, sub)?,
        Some(("chart", sub)) => chart(view, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub stats: UserStats,
    pub last_month_profit: Decimal,
}

pub fn summarize<Tz: TimeZone>(view: &View, now: &DateTime<Tz>) -> Summary {
    let stats = view.dashboard(now).stats;
    let now_utc = now.with_timezone(&Utc);
    let month_ago = now_utc
        .checked_sub_months(Months::new(1))
        .unwrap_or(now_utc);
    Summary {
        stats,
        last_month_profit: profit_since(view.transactions(), month_ago),
    }
}

fn summary(view: &View, sub: &clap::ArgMatches) -> Result<()> {
    let s = summarize(view, &Local::now());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let st = &s.stats;
    let rows = vec![
        vec!["Deals (all time)".into(), st.total_transactions.to_string()],
        vec!["Deals today".into(), st.transactions_today.to_string()],
        vec!["Total profit (period)".into(), fmt_amount(&st.total_profit)],
        vec!["Highest profit (period)".into(), fmt_amount(&st.highest_profit)],
        vec!["Average profit".into(), fmt_amount(&st.average_profit.round_dp(2))],
        vec!["Profit in the last month".into(), fmt_amount(&s.last_month_profit)],
        vec!["Profit streak (days)".into(), st.consecutive_profit_days.to_string()],
        vec!["Level".into(), st.level.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn periods(view: &View, sub: &clap::ArgMatches) -> Result<()> {
    let by = sub
        .get_one::<String>("by")
        .map(String::as_str)
        .unwrap_or("month");
    let period = Period::parse(by).ok_or_else(|| anyhow!("Unknown period '{}'", by))?;
    let mut buckets = period_counts(view.transactions(), &Local, period);
    if let Some(&limit) = sub.get_one::<usize>("limit") {
        buckets.truncate(limit);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        return Ok(());
    }
    let rows = buckets
        .iter()
        .map(|b| vec![b.period.clone(), b.count.to_string(), fmt_amount(&b.profit)])
        .collect();
    println!("{}", pretty_table(&["Period", "Deals", "Profit"], rows));
    Ok(())
}

/// A bar of up to `BAR_WIDTH` blocks for `value` relative to `max`.
pub fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let width = (value / max * Decimal::from(BAR_WIDTH as u64))
        .round()
        .to_usize()
        .unwrap_or(0)
        .clamp(1, BAR_WIDTH);
    "█".repeat(width)
}

fn chart(view: &View, sub: &clap::ArgMatches) -> Result<()> {
    let points = profit_series(view.transactions(), &Local);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    let max = points
        .iter()
        .map(|p| p.profit)
        .max()
        .unwrap_or(Decimal::ZERO);
    let rows = points
        .iter()
        .map(|p| vec![fmt_local(&p.at), fmt_amount(&p.profit), bar(p.profit, max)])
        .collect();
    println!("{}", pretty_table(&["Time", "Profit", ""], rows));
    Ok(())
}
