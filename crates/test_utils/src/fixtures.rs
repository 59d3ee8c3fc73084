//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the ledger.
//! Identifier fixtures are deterministic so tests can assert against them.

use core_kernel::{ExpenseId, GroupId, Money, UserId};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical restaurant bill split four ways
    pub fn dinner() -> Money {
        Money::new(dec!(800.00))
    }

    /// A typical grocery run
    pub fn groceries() -> Money {
        Money::new(dec!(700.00))
    }

    /// A small two-party amount
    pub fn coffee() -> Money {
        Money::new(dec!(40.00))
    }

    /// An amount that does not divide evenly three ways
    pub fn awkward_thirds() -> Money {
        Money::new(dec!(100.00))
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic user ID for testing
    pub fn user_id() -> UserId {
        UserId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic group ID for testing
    pub fn group_id() -> GroupId {
        GroupId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic expense ID for testing
    pub fn expense_id() -> ExpenseId {
        ExpenseId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates `n` distinct random user IDs
    pub fn user_ids(n: usize) -> Vec<UserId> {
        (0..n).map(|_| UserId::new()).collect()
    }
}

/// Fixture for user identity data
pub struct PersonFixtures;

impl PersonFixtures {
    /// A random plausible (name, email) pair
    pub fn identity() -> (String, String) {
        (Name().fake(), SafeEmail().fake())
    }

    /// `n` random plausible (name, email) pairs
    pub fn identities(n: usize) -> Vec<(String, String)> {
        (0..n).map(|_| Self::identity()).collect()
    }
}
