// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Folds the transaction history into summary numbers.
//!
//! Everything here is a pure function of its arguments. Profit totals respect
//! the reset checkpoint; counts, streaks and experience use the whole history.
//! Calendar days are taken in the timezone of the `now` argument. Sums
//! saturate at `Decimal::MAX` rather than panic on rows written by hand.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::amount::INPUT_UNIT;
use crate::leveling::level_from_experience;
use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_transactions: u64,
    pub total_profit: Decimal,
    pub highest_profit: Decimal,
    pub transactions_today: u64,
    pub average_profit: Decimal,
    pub consecutive_profit_days: u32,
    pub level: u32,
    pub experience: u64,
}

impl Default for UserStats {
    fn default() -> Self {
        UserStats {
            total_transactions: 0,
            total_profit: Decimal::ZERO,
            highest_profit: Decimal::ZERO,
            transactions_today: 0,
            average_profit: Decimal::ZERO,
            consecutive_profit_days: 0,
            level: 1,
            experience: 0,
        }
    }
}

/// What each partner is owed for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartyTotals {
    /// Original price plus half the profit.
    pub party_a: Decimal,
    /// Half the profit.
    pub party_b: Decimal,
}

fn in_period(tx: &Transaction, checkpoint: Option<DateTime<Utc>>) -> bool {
    checkpoint.is_none_or(|c| tx.created_at >= c)
}

fn local_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

/// One experience point per thousand of lifetime profit.
pub fn experience_from_profit(lifetime_profit: Decimal) -> u64 {
    if lifetime_profit <= Decimal::ZERO {
        return 0;
    }
    (lifetime_profit / INPUT_UNIT).floor().to_u64().unwrap_or(u64::MAX)
}

pub fn aggregate<Tz: TimeZone>(
    transactions: &[Transaction],
    checkpoint: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> UserStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut total_profit = Decimal::ZERO;
    let mut highest_profit = Decimal::ZERO;
    let mut lifetime_profit = Decimal::ZERO;
    let mut transactions_today = 0u64;

    for tx in transactions {
        lifetime_profit = lifetime_profit.saturating_add(tx.profit);
        if in_period(tx, checkpoint) {
            total_profit = total_profit.saturating_add(tx.profit);
            highest_profit = highest_profit.max(tx.profit);
        }
        if local_date(&tx.created_at, &tz) == today {
            transactions_today += 1;
        }
    }

    let total_transactions = transactions.len() as u64;
    let average_profit = if total_transactions == 0 {
        Decimal::ZERO
    } else {
        total_profit / Decimal::from(total_transactions)
    };
    let experience = experience_from_profit(lifetime_profit);

    UserStats {
        total_transactions,
        total_profit,
        highest_profit,
        transactions_today,
        average_profit,
        consecutive_profit_days: consecutive_profit_days(transactions, now),
        level: level_from_experience(experience),
        experience,
    }
}

/// Days in an unbroken run ending today with at least one profitable deal.
/// A day without a profitable deal ends the run; today without one gives 0.
pub fn consecutive_profit_days<Tz: TimeZone>(
    transactions: &[Transaction],
    now: &DateTime<Tz>,
) -> u32 {
    let tz = now.timezone();
    let days: BTreeSet<NaiveDate> = transactions
        .iter()
        .filter(|tx| tx.profit > Decimal::ZERO)
        .map(|tx| local_date(&tx.created_at, &tz))
        .collect();

    let mut streak = 0;
    let mut day = now.date_naive();
    while days.contains(&day) {
        streak += 1;
        day = match day.pred_opt() {
            Some(d) => d,
            None => break,
        };
    }
    streak
}

pub fn party_totals(transactions: &[Transaction], checkpoint: Option<DateTime<Utc>>) -> PartyTotals {
    transactions
        .iter()
        .filter(|tx| in_period(tx, checkpoint))
        .fold(
            PartyTotals {
                party_a: Decimal::ZERO,
                party_b: Decimal::ZERO,
            },
            |acc, tx| PartyTotals {
                party_a: acc
                    .party_a
                    .saturating_add(tx.original_price)
                    .saturating_add(tx.profit_per_person),
                party_b: acc.party_b.saturating_add(tx.profit_per_person),
            },
        )
}

/// Profit of every deal made at or after `since`.
pub fn profit_since(transactions: &[Transaction], since: DateTime<Utc>) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.created_at >= since)
        .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.profit))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Month,
    Year,
}

impl Period {
    pub fn parse(s: &str) -> Option<Period> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Some(Period::Day),
            "month" | "monthly" => Some(Period::Month),
            "year" | "yearly" => Some(Period::Year),
            _ => None,
        }
    }

    fn key(self, date: NaiveDate) -> String {
        match self {
            Period::Day => date.format("%Y-%m-%d").to_string(),
            Period::Month => date.format("%Y-%m").to_string(),
            Period::Year => date.format("%Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub period: String,
    pub count: u64,
    pub profit: Decimal,
}

/// Deal counts and profit per calendar bucket, newest bucket first.
pub fn period_counts<Tz: TimeZone>(
    transactions: &[Transaction],
    tz: &Tz,
    period: Period,
) -> Vec<PeriodBucket> {
    let mut map: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
    for tx in transactions {
        let entry = map
            .entry(period.key(local_date(&tx.created_at, tz)))
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(tx.profit);
    }
    map.into_iter()
        .rev()
        .map(|(period, (count, profit))| PeriodBucket {
            period,
            count,
            profit,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitPoint {
    pub at: DateTime<Utc>,
    pub date: NaiveDate,
    pub profit: Decimal,
}

/// Profit per deal in chronological order, for charting.
pub fn profit_series<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> Vec<ProfitPoint> {
    let mut points: Vec<ProfitPoint> = transactions
        .iter()
        .map(|tx| ProfitPoint {
            at: tx.created_at,
            date: local_date(&tx.created_at, tz),
            profit: tx.profit,
        })
        .collect();
    points.sort_by_key(|p| p.at);
    points
}
