// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::achievements::{self, Achievement};
use crate::leveling::LevelProgress;
use crate::models::Transaction;
use crate::stats::{self, PartyTotals, UserStats};

/// Everything the summary screens show, recomputed from the history.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: UserStats,
    pub totals: PartyTotals,
    pub progress: LevelProgress,
    pub unlocked: Vec<&'static Achievement>,
}

impl Dashboard {
    pub fn project<Tz: TimeZone>(
        transactions: &[Transaction],
        checkpoint: Option<DateTime<Utc>>,
        now: &DateTime<Tz>,
    ) -> Dashboard {
        let stats = stats::aggregate(transactions, checkpoint, now);
        let totals = stats::party_totals(transactions, checkpoint);
        let progress = LevelProgress::from_experience(stats.experience);
        let unlocked = achievements::unlocked(&stats);
        Dashboard {
            stats,
            totals,
            progress,
            unlocked,
        }
    }
}
