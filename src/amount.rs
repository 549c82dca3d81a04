// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns what the user typed into a canonical amount.
//!
//! Users enter prices in thousands: typing `12` means 12,000. The multiplier
//! is applied unconditionally, so `1500` is 1,500,000 and never "already
//! normalized".

use rust_decimal::Decimal;

use crate::error::{Result, SplitError};

/// One typed unit is this many currency units.
pub const INPUT_UNIT: Decimal = Decimal::ONE_THOUSAND;

/// Largest price a deal may carry (10^18). Sums over any realistic history
/// stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

pub fn within_limit(amount: Decimal) -> bool {
    amount <= MAX_AMOUNT
}

fn parse_number(input: &str) -> Option<Decimal> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// Strict parse used before anything is persisted.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    parse_number(input)
        .and_then(|n| n.checked_mul(INPUT_UNIT))
        .ok_or_else(|| SplitError::InvalidAmount(input.trim().to_string()))
}

/// Lenient parse: anything that is not a number becomes zero.
pub fn normalize(input: &str) -> Decimal {
    parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Candidate amounts for a partially typed price: `n`, `n*10` and `n*100`
/// thousands.
pub fn suggestions(input: &str) -> Vec<Decimal> {
    let Some(n) = parse_number(input) else {
        return Vec::new();
    };
    [Decimal::ONE, Decimal::TEN, Decimal::ONE_HUNDRED]
        .iter()
        .filter_map(|factor| n.checked_mul(*factor)?.checked_mul(INPUT_UNIT))
        .collect()
}
