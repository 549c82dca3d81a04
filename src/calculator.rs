// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::amount::{parse_amount, within_limit};
use crate::error::{Result, SplitError};
use crate::models::{Transaction, TransactionDraft, TransactionPatch};

/// Builds a draft from raw form input.
pub fn compute_transaction(
    original_raw: &str,
    selling_raw: &str,
    note: &str,
) -> Result<TransactionDraft> {
    let original = parse_amount(original_raw)?;
    let selling = parse_amount(selling_raw)?;
    derive(original, selling, Some(note))
}

/// Builds a draft from already-normalized prices.
pub fn derive(original: Decimal, selling: Decimal, note: Option<&str>) -> Result<TransactionDraft> {
    if original < Decimal::ZERO {
        return Err(SplitError::InvalidAmount(original.to_string()));
    }
    for amount in [original, selling] {
        if !within_limit(amount) {
            return Err(SplitError::InvalidAmount(amount.to_string()));
        }
    }
    if selling <= original {
        return Err(SplitError::InvalidOrdering { original, selling });
    }
    let profit = selling - original;
    Ok(TransactionDraft {
        original_price: original,
        selling_price: selling,
        profit,
        profit_per_person: profit / Decimal::TWO,
        note: clean_note(note),
    })
}

/// Applies an edit on top of an existing record and re-derives profit.
pub fn apply_patch(existing: &Transaction, patch: &TransactionPatch) -> Result<TransactionDraft> {
    let original = patch.original_price.unwrap_or(existing.original_price);
    let selling = patch.selling_price.unwrap_or(existing.selling_price);
    let note = match &patch.note {
        Some(n) => n.as_deref(),
        None => existing.note.as_deref(),
    };
    derive(original, selling, note)
}

fn clean_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
