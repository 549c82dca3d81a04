// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use profitsplit::amount::{MAX_AMOUNT, normalize, parse_amount, suggestions};
use profitsplit::calculator::{apply_patch, compute_transaction};
use profitsplit::error::SplitError;
use profitsplit::models::TransactionPatch;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

#[test]
fn normalize_scales_by_thousand() {
    assert_eq!(normalize("12"), dec!(12000));
    assert_eq!(normalize("1.5"), dec!(1500));
    assert_eq!(normalize("  7 "), dec!(7000));
    // no threshold: large inputs are scaled too
    assert_eq!(normalize("1500"), dec!(1500000));
}

#[test]
fn normalize_treats_garbage_as_zero() {
    assert_eq!(normalize("abc"), Decimal::ZERO);
    assert_eq!(normalize(""), Decimal::ZERO);
    assert_eq!(normalize("   "), Decimal::ZERO);
}

#[test]
fn parse_amount_rejects_garbage() {
    assert!(matches!(parse_amount("12x"), Err(SplitError::InvalidAmount(_))));
    assert!(matches!(parse_amount(""), Err(SplitError::InvalidAmount(_))));
    // a numeric prefix is not enough
    assert_eq!(normalize("12k"), Decimal::ZERO);
    assert!(matches!(
        compute_transaction("12k", "20", ""),
        Err(SplitError::InvalidAmount(_))
    ));
}

#[test]
fn suggestions_offer_three_magnitudes() {
    assert_eq!(
        suggestions("5"),
        vec![dec!(5000), dec!(50000), dec!(500000)]
    );
    assert!(suggestions("five").is_empty());
}

#[test]
fn compute_splits_profit_in_half() {
    let d = compute_transaction("10", "25", "  first deal ").unwrap();
    assert_eq!(d.original_price, dec!(10000));
    assert_eq!(d.selling_price, dec!(25000));
    assert_eq!(d.profit, dec!(15000));
    assert_eq!(d.profit_per_person, dec!(7500));
    assert_eq!(d.note.as_deref(), Some("first deal"));
    d.validate().unwrap();
}

#[test]
fn compute_keeps_odd_profit_exact() {
    let d = compute_transaction("0.001", "0.002", "").unwrap();
    assert_eq!(d.profit, dec!(1));
    assert_eq!(d.profit_per_person, dec!(0.5));
    assert_eq!(d.note, None);
}

#[test]
fn compute_rejects_selling_at_or_below_original() {
    let err = compute_transaction("10", "10", "").unwrap_err();
    assert!(matches!(err, SplitError::InvalidOrdering { .. }));
    assert!(err.is_validation());
    assert!(!err.is_retryable());

    let err = compute_transaction("10", "9", "").unwrap_err();
    assert!(matches!(err, SplitError::InvalidOrdering { .. }));
}

#[test]
fn compute_rejects_negative_and_unparseable_input() {
    assert!(matches!(
        compute_transaction("-1", "5", ""),
        Err(SplitError::InvalidAmount(_))
    ));
    assert!(matches!(
        compute_transaction("ten", "20", ""),
        Err(SplitError::InvalidAmount(_))
    ));
}

#[test]
fn zero_original_is_allowed() {
    let d = compute_transaction("0", "1", "").unwrap();
    assert_eq!(d.profit, dec!(1000));
}

#[test]
fn amounts_above_the_cap_are_rejected() {
    assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_000i64));
    assert!(compute_transaction("0", "1000000000000000", "").is_ok());
    assert!(matches!(
        compute_transaction("0", "1000000000000001", ""),
        Err(SplitError::InvalidAmount(_))
    ));
    assert!(matches!(
        compute_transaction("0", "79228162514264337593543950", ""),
        Err(SplitError::InvalidAmount(_))
    ));
}

#[test]
fn patch_rederives_profit() {
    let tx = common::make_tx(1, common::at(2026, 3, 1, 9, 0), 1000, 3000);
    let patch = TransactionPatch {
        selling_price: Some(dec!(5000)),
        ..Default::default()
    };
    let d = apply_patch(&tx, &patch).unwrap();
    assert_eq!(d.original_price, dec!(1000));
    assert_eq!(d.profit, dec!(4000));
    assert_eq!(d.profit_per_person, dec!(2000));
}

#[test]
fn patch_can_clear_note() {
    let mut tx = common::make_tx(1, common::at(2026, 3, 1, 9, 0), 1000, 3000);
    tx.note = Some("keep?".into());
    let patch = TransactionPatch {
        note: Some(None),
        ..Default::default()
    };
    assert_eq!(apply_patch(&tx, &patch).unwrap().note, None);
    assert_eq!(
        apply_patch(&tx, &TransactionPatch::default()).unwrap().note.as_deref(),
        Some("keep?")
    );
}

#[test]
fn patch_that_breaks_ordering_fails() {
    let tx = common::make_tx(1, common::at(2026, 3, 1, 9, 0), 1000, 3000);
    let patch = TransactionPatch {
        original_price: Some(dec!(3000)),
        ..Default::default()
    };
    assert!(matches!(
        apply_patch(&tx, &patch),
        Err(SplitError::InvalidOrdering { .. })
    ));
}

proptest! {
    #[test]
    fn any_sale_above_cost_is_accepted(a in 0u32..10_000_000, gap in 1u32..10_000_000) {
        let b = a as u64 + gap as u64;
        let d = compute_transaction(&a.to_string(), &b.to_string(), "").unwrap();
        prop_assert_eq!(d.profit, d.selling_price - d.original_price);
        prop_assert_eq!(d.profit_per_person * Decimal::TWO, d.profit);
        prop_assert!(d.profit > Decimal::ZERO);
    }

    #[test]
    fn any_sale_at_or_below_cost_is_rejected(a in 0u32..10_000_000, drop in 0u32..10_000_000) {
        let b = (a as u64).saturating_sub(drop as u64);
        let result = compute_transaction(&a.to_string(), &b.to_string(), "");
        prop_assert!(
            matches!(result, Err(SplitError::InvalidOrdering { .. })),
            "expected ordering error"
        );
    }

    #[test]
    fn normalize_is_linear(n in 0u32..1_000_000) {
        prop_assert_eq!(normalize(&n.to_string()), Decimal::from(n) * Decimal::ONE_THOUSAND);
    }
}
