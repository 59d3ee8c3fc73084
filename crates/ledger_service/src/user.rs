//! Users and their individual (non-group) balances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Money, UserId};

/// A registered user.
///
/// The balance map covers individual transactions only; group balances live
/// in the group's own graph. Positive means the counterpart owes this user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    balances: HashMap<UserId, Money>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with an empty balance map.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new_v7(),
            name: name.into(),
            email: email.into(),
            balances: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Applies a signed balance update against a counterpart.
    ///
    /// Entries that land within the settlement epsilon are removed, never
    /// stored as zero.
    pub fn update_balance(&mut self, counterpart: UserId, delta: Money) {
        let updated = self.balance_with(counterpart) + delta;
        if updated.is_negligible() {
            self.balances.remove(&counterpart);
        } else {
            self.balances.insert(counterpart, updated);
        }
    }

    /// Returns the signed balance with a counterpart (zero if none).
    pub fn balance_with(&self, counterpart: UserId) -> Money {
        self.balances.get(&counterpart).copied().unwrap_or(Money::ZERO)
    }

    /// Returns all outstanding individual balances.
    pub fn balances(&self) -> &HashMap<UserId, Money> {
        &self.balances
    }

    /// Total others owe this user across all counterparts.
    pub fn total_receivable(&self) -> Money {
        self.balances
            .values()
            .filter(|m| m.is_positive())
            .copied()
            .sum()
    }

    /// Total this user owes others across all counterparts.
    pub fn total_payable(&self) -> Money {
        self.balances
            .values()
            .filter(|m| m.is_negative())
            .map(Money::abs)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_update_balance_accumulates() {
        let mut user = User::new("Aditya", "aditya@example.com");
        let other = UserId::new();

        user.update_balance(other, Money::new(dec!(100)));
        user.update_balance(other, Money::new(dec!(-30)));

        assert_eq!(user.balance_with(other), Money::new(dec!(70)));
    }

    #[test]
    fn test_zero_crossing_removes_entry() {
        let mut user = User::new("Rohit", "rohit@example.com");
        let other = UserId::new();

        user.update_balance(other, Money::new(dec!(40)));
        user.update_balance(other, Money::new(dec!(-40)));

        assert!(user.balances().is_empty());
    }

    #[test]
    fn test_totals_split_by_sign() {
        let mut user = User::new("Manish", "manish@example.com");
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());

        user.update_balance(a, Money::new(dec!(100)));
        user.update_balance(b, Money::new(dec!(-25)));
        user.update_balance(c, Money::new(dec!(-75)));

        assert_eq!(user.total_receivable(), Money::new(dec!(100)));
        assert_eq!(user.total_payable(), Money::new(dec!(100)));
    }
}
