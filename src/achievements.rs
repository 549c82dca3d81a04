// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Badge catalog.
//!
//! Each badge is a rule over one `UserStats` field. Badges are re-evaluated
//! from scratch on every call, so a badge disappears again when the stat it
//! depends on drops (for example after a totals reset).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::stats::UserStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    TotalTransactions,
    TotalProfit,
    HighestProfit,
    TransactionsToday,
    AverageProfit,
    ConsecutiveProfitDays,
    Level,
    Experience,
}

impl StatField {
    pub fn value(self, stats: &UserStats) -> Decimal {
        match self {
            StatField::TotalTransactions => Decimal::from(stats.total_transactions),
            StatField::TotalProfit => stats.total_profit,
            StatField::HighestProfit => stats.highest_profit,
            StatField::TransactionsToday => Decimal::from(stats.transactions_today),
            StatField::AverageProfit => stats.average_profit,
            StatField::ConsecutiveProfitDays => Decimal::from(stats.consecutive_profit_days),
            StatField::Level => Decimal::from(stats.level),
            StatField::Experience => Decimal::from(stats.experience),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    AtLeast,
    GreaterThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub field: StatField,
    pub comparator: Comparator,
    pub threshold: i64,
}

impl Rule {
    const fn at_least(field: StatField, threshold: i64) -> Rule {
        Rule {
            field,
            comparator: Comparator::AtLeast,
            threshold,
        }
    }

    pub fn holds(&self, stats: &UserStats) -> bool {
        let value = self.field.value(stats);
        let threshold = Decimal::from(self.threshold);
        match self.comparator {
            Comparator::AtLeast => value >= threshold,
            Comparator::GreaterThan => value > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
    pub rule: Rule,
}

pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "first_trade",
        title: "Apprentice Trader",
        description: "Complete your first deal",
        icon: "🌟",
        rarity: Rarity::Common,
        rule: Rule::at_least(StatField::TotalTransactions, 1),
    },
    Achievement {
        id: "profit_master",
        title: "Profit Master",
        description: "Reach 10,000,000 in total profit",
        icon: "💰",
        rarity: Rarity::Rare,
        rule: Rule::at_least(StatField::TotalProfit, 10_000_000),
    },
    Achievement {
        id: "speed_trader",
        title: "Speed Trader",
        description: "Complete 5 deals in one day",
        icon: "⚡",
        rarity: Rarity::Rare,
        rule: Rule::at_least(StatField::TransactionsToday, 5),
    },
    Achievement {
        id: "golden_deal",
        title: "Golden Deal",
        description: "Make 5,000,000 profit on a single deal",
        icon: "🏆",
        rarity: Rarity::Epic,
        rule: Rule::at_least(StatField::HighestProfit, 5_000_000),
    },
    Achievement {
        id: "consistent_trader",
        title: "Consistent Trader",
        description: "Turn a profit 7 days in a row",
        icon: "📈",
        rarity: Rarity::Epic,
        rule: Rule::at_least(StatField::ConsecutiveProfitDays, 7),
    },
    Achievement {
        id: "legendary_trader",
        title: "Legendary Trader",
        description: "Reach level 10",
        icon: "👑",
        rarity: Rarity::Legendary,
        rule: Rule::at_least(StatField::Level, 10),
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Every badge whose rule holds, in catalog order.
pub fn unlocked(stats: &UserStats) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| a.rule.holds(stats)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

/// The full catalog with an unlocked flag per badge.
pub fn evaluate(stats: &UserStats) -> Vec<BadgeStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| BadgeStatus {
            achievement,
            unlocked: achievement.rule.holds(stats),
        })
        .collect()
}
