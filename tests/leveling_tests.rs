// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use profitsplit::achievements::{
    ACHIEVEMENTS, Comparator, Rule, StatField, evaluate, find, unlocked,
};
use profitsplit::dashboard::Dashboard;
use profitsplit::leveling::{
    LevelProgress, cumulative_experience_before, experience_for_level, level_from_experience,
};
use profitsplit::stats::UserStats;
use proptest::prelude::*;
use rust_decimal_macros::dec;

mod common;
use common::{at, with_profits};

#[test]
fn band_widths_grow_by_half() {
    assert_eq!(experience_for_level(0), 0);
    assert_eq!(experience_for_level(1), 1000);
    assert_eq!(experience_for_level(2), 1500);
    assert_eq!(experience_for_level(3), 2250);
    assert_eq!(experience_for_level(4), 3375);
    assert_eq!(cumulative_experience_before(1), 0);
    assert_eq!(cumulative_experience_before(3), 2500);
}

#[test]
fn level_boundaries() {
    assert_eq!(level_from_experience(0), 1);
    assert_eq!(level_from_experience(999), 1);
    assert_eq!(level_from_experience(1000), 2);
    assert_eq!(level_from_experience(2499), 2);
    assert_eq!(level_from_experience(2500), 3);
    assert_eq!(level_from_experience(4750), 4);
}

#[test]
fn huge_experience_does_not_hang() {
    assert!(level_from_experience(u64::MAX) > 50);
}

#[test]
fn progress_inside_band() {
    let p = LevelProgress::from_experience(1750);
    assert_eq!(p.level, 2);
    assert_eq!(p.into_level, 750);
    assert_eq!(p.band, 1500);
    assert_eq!(p.remaining(), 750);
    assert!((p.percent - 50.0).abs() < 1e-9);

    let fresh = LevelProgress::from_experience(0);
    assert_eq!(fresh.level, 1);
    assert_eq!(fresh.percent, 0.0);
}

proptest! {
    #[test]
    fn level_is_monotonic(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_from_experience(lo) <= level_from_experience(hi));
    }

    #[test]
    fn progress_percent_stays_in_range(xp in 0u64..1_000_000_000) {
        let p = LevelProgress::from_experience(xp);
        prop_assert!((0.0..=100.0).contains(&p.percent));
        prop_assert!(p.into_level < p.band);
    }
}

fn stats() -> UserStats {
    UserStats::default()
}

#[test]
fn nothing_unlocked_on_empty_stats() {
    assert!(unlocked(&stats()).is_empty());
    assert_eq!(evaluate(&stats()).len(), ACHIEVEMENTS.len());
}

#[test]
fn first_trade_unlocks_with_one_deal() {
    let s = UserStats {
        total_transactions: 1,
        ..stats()
    };
    let ids: Vec<_> = unlocked(&s).iter().map(|a| a.id).collect();
    assert_eq!(ids, ["first_trade"]);
}

#[test]
fn thresholds_are_inclusive() {
    let s = UserStats {
        total_transactions: 5,
        transactions_today: 5,
        total_profit: dec!(10000000),
        highest_profit: dec!(5000000),
        consecutive_profit_days: 7,
        level: 10,
        ..stats()
    };
    assert_eq!(unlocked(&s).len(), ACHIEVEMENTS.len());

    let below = UserStats {
        transactions_today: 4,
        total_profit: dec!(9999999.99),
        highest_profit: dec!(4999999),
        consecutive_profit_days: 6,
        level: 9,
        ..s
    };
    let ids: Vec<_> = unlocked(&below).iter().map(|a| a.id).collect();
    assert_eq!(ids, ["first_trade"]);
}

#[test]
fn legendary_needs_level_ten() {
    let rule = find("legendary_trader").unwrap().rule;
    assert!(!rule.holds(&UserStats { level: 9, ..stats() }));
    assert!(rule.holds(&UserStats { level: 10, ..stats() }));
    assert!(find("no_such_badge").is_none());
}

#[test]
fn rule_comparators_differ_at_the_threshold() {
    let at_least = Rule {
        field: StatField::AverageProfit,
        comparator: Comparator::AtLeast,
        threshold: 500,
    };
    let greater = Rule {
        comparator: Comparator::GreaterThan,
        ..at_least
    };
    let on = UserStats {
        average_profit: dec!(500),
        ..stats()
    };
    let above = UserStats {
        average_profit: dec!(500.01),
        ..stats()
    };
    assert!(at_least.holds(&on));
    assert!(!greater.holds(&on));
    assert!(greater.holds(&above));

    let experience = Rule {
        field: StatField::Experience,
        comparator: Comparator::GreaterThan,
        threshold: 0,
    };
    assert!(!experience.holds(&stats()));
    assert!(experience.holds(&UserStats { experience: 1, ..stats() }));
}

#[test]
fn badges_relock_after_reset() {
    let now = at(2026, 5, 10, 18, 0);
    let txs = with_profits(at(2026, 5, 10, 8, 0), &[6_000_000, 5_000_000]);
    let before = Dashboard::project(&txs, None, &now);
    let ids: Vec<_> = before.unlocked.iter().map(|a| a.id).collect();
    assert!(ids.contains(&"profit_master"));
    assert!(ids.contains(&"golden_deal"));

    let after = Dashboard::project(&txs, Some(at(2026, 5, 10, 12, 0)), &now);
    let ids: Vec<_> = after.unlocked.iter().map(|a| a.id).collect();
    assert!(!ids.contains(&"profit_master"));
    assert!(!ids.contains(&"golden_deal"));
    assert!(ids.contains(&"first_trade"));
    // experience is lifetime, so the level survives the reset
    assert_eq!(after.progress.level, before.progress.level);
}
