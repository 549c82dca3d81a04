// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::within_limit;
use crate::error::{Result, SplitError};

/// A persisted buy/sell deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub original_price: Decimal,
    pub selling_price: Decimal,
    pub profit: Decimal,
    pub profit_per_person: Decimal,
    pub note: Option<String>,
}

/// A validated deal that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub original_price: Decimal,
    pub selling_price: Decimal,
    pub profit: Decimal,
    pub profit_per_person: Decimal,
    pub note: Option<String>,
}

impl TransactionDraft {
    /// Re-checks the derived fields. The store calls this before every write.
    pub fn validate(&self) -> Result<()> {
        if self.original_price < Decimal::ZERO {
            return Err(SplitError::InvalidAmount(self.original_price.to_string()));
        }
        if !within_limit(self.selling_price) {
            return Err(SplitError::InvalidAmount(self.selling_price.to_string()));
        }
        if self.selling_price <= self.original_price {
            return Err(SplitError::InvalidOrdering {
                original: self.original_price,
                selling: self.selling_price,
            });
        }
        let profit = self.selling_price - self.original_price;
        if self.profit != profit || self.profit_per_person != profit / Decimal::TWO {
            return Err(SplitError::InvalidAmount(format!(
                "profit {} does not match {} - {}",
                self.profit, self.selling_price, self.original_price
            )));
        }
        Ok(())
    }

    pub fn into_transaction(self, id: i64, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            created_at,
            original_price: self.original_price,
            selling_price: self.selling_price,
            profit: self.profit,
            profit_per_person: self.profit_per_person,
            note: self.note,
        }
    }
}

/// Changes requested by an edit. Prices are already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub original_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    /// `Some(None)` clears the note.
    pub note: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.original_price.is_none() && self.selling_price.is_none() && self.note.is_none()
    }
}

/// Marks the start of the current accounting period for party totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}
