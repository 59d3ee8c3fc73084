//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledger data
//! that maintains domain invariants.

use core_kernel::{Money, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strategy for generating positive amounts in minor units (cents)
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for generating signed amounts in minor units (cents)
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    -10_000_000i64..10_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for generating signed Money values
pub fn money_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for generating `count` distinct user ids
pub fn user_ids_strategy(count: usize) -> impl Strategy<Value = Vec<UserId>> {
    Just(()).prop_map(move |_| (0..count).map(|_| UserId::new()).collect())
}

/// Strategy for generating percentage vectors that sum to exactly 100.
/// Requires `count >= 1`.
pub fn percentages_strategy(count: usize) -> impl Strategy<Value = Vec<Decimal>> {
    assert!(count >= 1, "percentages_strategy requires at least one participant");
    proptest::collection::vec(1u32..1000u32, count..=count).prop_map(move |weights| {
        let total: u32 = weights.iter().sum();
        let mut percentages: Vec<Decimal> = weights
            .iter()
            .map(|&w| dec!(100) * Decimal::from(w) / Decimal::from(total))
            .collect();
        let assigned: Decimal = percentages.iter().take(count - 1).copied().sum();
        percentages[count - 1] = dec!(100) - assigned;
        percentages
    })
}

/// Strategy for generating exact split values summing to a given total.
/// Requires `count >= 1`.
pub fn exact_values_strategy(total: Money, count: usize) -> impl Strategy<Value = Vec<Decimal>> {
    assert!(count >= 1, "exact_values_strategy requires at least one participant");
    proptest::collection::vec(1u32..1000u32, count..=count).prop_map(move |weights| {
        let sum: u32 = weights.iter().sum();
        let mut values: Vec<Decimal> = weights
            .iter()
            .map(|&w| total.amount() * Decimal::from(w) / Decimal::from(sum))
            .collect();
        let assigned: Decimal = values.iter().take(count - 1).copied().sum();
        values[count - 1] = total.amount() - assigned;
        values
    })
}

/// A scripted sequence of balance adjustments between members of a
/// fixed-size group, for driving graph invariant properties.
pub fn adjustment_script_strategy(
    member_count: usize,
    max_steps: usize,
) -> impl Strategy<Value = Vec<(usize, usize, Money)>> {
    proptest::collection::vec(
        (0..member_count, 0..member_count, amount_minor_strategy()),
        1..=max_steps,
    )
    .prop_map(|steps| {
        steps
            .into_iter()
            .map(|(from, to, minor)| (from, to, Money::from_minor(minor)))
            .collect()
    })
}
