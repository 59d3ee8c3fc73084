//! Money with precise decimal arithmetic
//!
//! All ledger amounts are signed `rust_decimal` values. The ledger treats any
//! amount whose magnitude is below [`SETTLEMENT_EPSILON`] as settled, so
//! callers never have to reason about sub-cent residue from division.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Balances with a magnitude below this are considered settled and are
/// removed from balance maps rather than stored as zero.
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// A signed monetary amount.
///
/// Single-currency by design: the ledger models one currency unit and cares
/// only about two-decimal tolerance, not ISO rounding rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a money value from a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a money value from minor units (cents).
    pub fn from_minor(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, 2))
    }

    /// Returns the underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the magnitude is below the settlement epsilon.
    pub fn is_negligible(&self) -> bool {
        self.0.abs() < SETTLEMENT_EPSILON
    }

    /// Returns true if this is a meaningful credit (above epsilon).
    pub fn is_positive(&self) -> bool {
        self.0 >= SETTLEMENT_EPSILON
    }

    /// Returns true if this is a meaningful debt (below negative epsilon).
    pub fn is_negative(&self) -> bool {
        self.0 <= -SETTLEMENT_EPSILON
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns true if the two amounts differ by less than the epsilon.
    pub fn approx_eq(&self, other: &Self) -> bool {
        (*self - *other).is_negligible()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negligible_threshold() {
        assert!(Money::new(dec!(0.009)).is_negligible());
        assert!(Money::new(dec!(-0.009)).is_negligible());
        assert!(!Money::new(dec!(0.01)).is_negligible());
    }

    #[test]
    fn test_sign_predicates_respect_epsilon() {
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(!Money::new(dec!(0.005)).is_positive());
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(!Money::new(dec!(-0.005)).is_negative());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::new(dec!(200)).to_string(), "200.00");
        assert_eq!(Money::from_minor(12345).to_string(), "123.45");
    }

    #[test]
    fn test_sum_of_thirds_is_approx_total() {
        let total = Money::new(dec!(100));
        let share = Money::new(dec!(100) / dec!(3));
        let sum: Money = std::iter::repeat(share).take(3).sum();
        assert!(sum.approx_eq(&total));
    }
}
