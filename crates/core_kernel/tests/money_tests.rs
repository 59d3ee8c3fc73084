//! Money behavior tests

use core_kernel::{Money, SETTLEMENT_EPSILON};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_from_minor_units() {
    assert_eq!(Money::from_minor(80000), Money::new(dec!(800)));
    assert_eq!(Money::from_minor(-50), Money::new(dec!(-0.50)));
}

#[test]
fn test_arithmetic() {
    let a = Money::new(dec!(300));
    let b = Money::new(dec!(100.25));

    assert_eq!(a + b, Money::new(dec!(400.25)));
    assert_eq!(a - b, Money::new(dec!(199.75)));
    assert_eq!(-a, Money::new(dec!(-300)));
    assert_eq!(a.min(b), b);
}

#[test]
fn test_assign_operators() {
    let mut balance = Money::ZERO;
    balance += Money::new(dec!(200));
    balance -= Money::new(dec!(50));
    assert_eq!(balance, Money::new(dec!(150)));
}

#[test]
fn test_epsilon_is_one_cent() {
    assert_eq!(SETTLEMENT_EPSILON, dec!(0.01));
}

#[test]
fn test_sum_over_iterator() {
    let shares = [Money::new(dec!(200)); 4];
    let total: Money = shares.into_iter().sum();
    assert_eq!(total, Money::new(dec!(800)));
}

#[test]
fn test_serde_transparent() {
    let m = Money::new(dec!(12.34));
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, "\"12.34\"");
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn addition_then_subtraction_round_trips(
            a in -1_000_000_000i64..1_000_000_000i64,
            b in -1_000_000_000i64..1_000_000_000i64
        ) {
            let ma = Money::from_minor(a);
            let mb = Money::from_minor(b);
            prop_assert_eq!(ma + mb - mb, ma);
        }

        #[test]
        fn negation_flips_net_to_zero(a in -1_000_000_000i64..1_000_000_000i64) {
            let m = Money::from_minor(a);
            prop_assert_eq!(m + (-m), Money::ZERO);
        }

        #[test]
        fn abs_is_non_negative(a in -1_000_000_000i64..1_000_000_000i64) {
            let m = Money::from_minor(a);
            prop_assert!(m.abs().amount() >= Decimal::ZERO);
        }
    }
}
