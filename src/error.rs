// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the profit core and the record store.
///
/// `InvalidAmount` and `InvalidOrdering` are input problems and are reported
/// as-is. `StoreUnavailable` means the write may or may not have landed; the
/// caller re-fetches before trusting local state.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Selling price {selling} must be greater than original price {original}")]
    InvalidOrdering { original: Decimal, selling: Decimal },

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Transaction {0} not found")]
    NotFound(i64),

    #[error("Stored record {id} is corrupt: {reason}")]
    CorruptRecord { id: i64, reason: String },
}

impl SplitError {
    /// True for errors the user fixes by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SplitError::InvalidAmount(_) | SplitError::InvalidOrdering { .. }
        )
    }

    /// True when retrying the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SplitError::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
