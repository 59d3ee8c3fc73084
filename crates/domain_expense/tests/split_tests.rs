//! Split strategy property tests

use core_kernel::{Money, UserId, SETTLEMENT_EPSILON};
use domain_expense::{compute_splits, SplitType};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn participant_ids(n: usize) -> Vec<UserId> {
    (0..n).map(|_| UserId::new()).collect()
}

proptest! {
    /// Equal splits always cover the total within the settlement epsilon.
    #[test]
    fn equal_split_sum_matches_total(
        total_minor in 1i64..100_000_000i64,
        count in 1usize..50usize
    ) {
        let total = Money::from_minor(total_minor);
        let participants = participant_ids(count);

        let splits = compute_splits(SplitType::Equal, total, &participants, None).unwrap();
        let sum: Money = splits.iter().map(|s| s.amount).sum();

        prop_assert!((sum.amount() - total.amount()).abs() < SETTLEMENT_EPSILON);
        prop_assert_eq!(splits.len(), count);
    }

    /// Exact splits echo the supplied values when they sum to the total.
    #[test]
    fn exact_split_preserves_values(
        shares_minor in proptest::collection::vec(0i64..10_000_000i64, 1..20)
    ) {
        let total_minor: i64 = shares_minor.iter().sum();
        prop_assume!(total_minor > 0);

        let total = Money::from_minor(total_minor);
        let participants = participant_ids(shares_minor.len());
        let values: Vec<Decimal> = shares_minor.iter().map(|&m| Decimal::new(m, 2)).collect();

        let splits =
            compute_splits(SplitType::Exact, total, &participants, Some(&values)).unwrap();

        for (split, &value) in splits.iter().zip(&values) {
            prop_assert_eq!(split.amount.amount(), value);
        }
    }

    /// Percentage splits over weights normalized to 100 cover the total.
    #[test]
    fn percentage_split_sum_matches_total(
        total_minor in 1i64..100_000_000i64,
        weights in proptest::collection::vec(1u32..1000u32, 1..20)
    ) {
        let total = Money::from_minor(total_minor);
        let participants = participant_ids(weights.len());

        let weight_sum: u32 = weights.iter().sum();
        let mut values: Vec<Decimal> = weights
            .iter()
            .map(|&w| Decimal::from(w) * Decimal::from(100u32) / Decimal::from(weight_sum))
            .collect();
        // Push rounding drift into the last percentage so they sum to exactly 100
        let assigned: Decimal = values.iter().take(values.len() - 1).sum();
        *values.last_mut().unwrap() = Decimal::from(100u32) - assigned;
        prop_assume!(!values.last().unwrap().is_sign_negative());

        let splits =
            compute_splits(SplitType::Percentage, total, &participants, Some(&values)).unwrap();
        let sum: Money = splits.iter().map(|s| s.amount).sum();

        prop_assert!((sum.amount() - total.amount()).abs() < SETTLEMENT_EPSILON);
    }

    /// No strategy ever emits a negative share from valid input.
    #[test]
    fn shares_are_never_negative(
        total_minor in 1i64..100_000_000i64,
        count in 1usize..30usize
    ) {
        let total = Money::from_minor(total_minor);
        let participants = participant_ids(count);

        let splits = compute_splits(SplitType::Equal, total, &participants, None).unwrap();
        for split in splits {
            prop_assert!(!split.amount.amount().is_sign_negative());
        }
    }
}
