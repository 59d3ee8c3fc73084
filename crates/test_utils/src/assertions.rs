//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Money, UserId, SETTLEMENT_EPSILON};
use domain_ledger::BalanceGraph;

/// Asserts that two Money values agree within the settlement epsilon.
pub fn assert_money_approx_eq(actual: Money, expected: Money) {
    assert!(
        actual.approx_eq(&expected),
        "Money values differ beyond the settlement epsilon: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that every edge in a balance graph has an exact mirrored
/// negation.
pub fn assert_antisymmetric(graph: &BalanceGraph) {
    let members: Vec<UserId> = graph.members().collect();
    for &a in &members {
        for &b in &members {
            let forward = graph.get(a, b);
            let backward = graph.get(b, a);
            assert_eq!(
                forward, -backward,
                "Anti-symmetry violated between {} and {}: {} vs {}",
                a, b, forward, backward
            );
        }
    }
}

/// Asserts that no stored edge is within the settlement epsilon of zero.
pub fn assert_no_negligible_edges(graph: &BalanceGraph) {
    for member in graph.members() {
        if let Some(row) = graph.row(member) {
            for (&counterpart, &amount) in row {
                assert!(
                    amount.amount().abs() >= SETTLEMENT_EPSILON,
                    "Negligible edge stored between {} and {}: {}",
                    member,
                    counterpart,
                    amount
                );
            }
        }
    }
}

/// Asserts that two balance graphs give every member the same net
/// position, within the settlement epsilon.
pub fn assert_nets_preserved(before: &BalanceGraph, after: &BalanceGraph) {
    for member in before.members() {
        assert_money_approx_eq(after.net(member), before.net(member));
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
