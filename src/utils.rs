// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

/// Resolves a wall-clock time in `tz`. Times inside a DST gap are rejected.
pub fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("'{}' does not exist in the local timezone", naive))
}

/// Accepts RFC 3339, or `YYYY-MM-DD HH:MM` in local time.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Ok(d.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").with_context(|| {
        format!("Invalid timestamp '{}', expected RFC 3339 or YYYY-MM-DD HH:MM", s)
    })?;
    localize(&Local, naive)
}

/// First and last instant of `day` in `tz`.
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight =
        NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(|| anyhow!("invalid start of day"))?;
    let start = localize(tz, day.and_time(midnight))?;
    let last = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| anyhow!("invalid end of day"))?;
    let end = localize(tz, day.and_time(last))?;
    Ok((start, end))
}

/// First and last instant of the minute starting at `day` `time` in `tz`.
pub fn minute_bounds<Tz: TimeZone>(
    tz: &Tz,
    day: NaiveDate,
    time: NaiveTime,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = localize(tz, day.and_time(time))?;
    let end = start + chrono::Duration::microseconds(59_999_999);
    Ok((start, end))
}

/// Groups thousands and drops trailing zeros: `12500000.50` → `12,500,000.5`.
pub fn fmt_amount(d: &Decimal) -> String {
    let s = d.normalize().to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn fmt_local(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
