//! Pairwise balance graph
//!
//! The graph stores, per member, what every counterpart owes them (positive)
//! or is owed by them (negative). [`BalanceGraph::adjust`] is the only
//! mutation path for edges, which keeps the anti-symmetry and zero-removal
//! invariants in one place instead of at every call site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Money, UserId};

/// Per-group mapping from member to counterpart to signed amount owed.
///
/// `balance[a][b] > 0` means `b` owes `a` that amount; the mirrored entry
/// `balance[b][a]` always carries the negated value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceGraph {
    balances: HashMap<UserId, HashMap<UserId, Money>>,
}

impl BalanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty balance row for a member. Idempotent.
    pub fn add_member(&mut self, user_id: UserId) {
        self.balances.entry(user_id).or_default();
    }

    /// Removes a member's row and their column from every other row.
    ///
    /// Callers are expected to check [`Self::is_settled`] first; removing an
    /// unsettled member would silently drop debt.
    pub fn remove_member(&mut self, user_id: UserId) {
        self.balances.remove(&user_id);
        for row in self.balances.values_mut() {
            row.remove(&user_id);
        }
    }

    /// Returns true if the member has a balance row.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.balances.contains_key(&user_id)
    }

    /// Applies a signed balance update between two members.
    ///
    /// `delta > 0` records that `to` owes `from` an additional `delta`. The
    /// mirrored edge is updated with the negated amount, and either entry is
    /// dropped when it crosses into the settlement epsilon.
    pub fn adjust(&mut self, from: UserId, to: UserId, delta: Money) {
        if from == to || delta == Money::ZERO {
            return;
        }
        self.apply_one_direction(from, to, delta);
        self.apply_one_direction(to, from, -delta);
    }

    fn apply_one_direction(&mut self, owner: UserId, counterpart: UserId, delta: Money) {
        let row = self.balances.entry(owner).or_default();
        let updated = row.get(&counterpart).copied().unwrap_or(Money::ZERO) + delta;

        if updated.is_negligible() {
            row.remove(&counterpart);
        } else {
            row.insert(counterpart, updated);
        }
    }

    /// Returns the signed balance between two members (zero if no edge).
    pub fn get(&self, owner: UserId, counterpart: UserId) -> Money {
        self.balances
            .get(&owner)
            .and_then(|row| row.get(&counterpart))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// Returns a member's balance row, if they are in the graph.
    pub fn row(&self, user_id: UserId) -> Option<&HashMap<UserId, Money>> {
        self.balances.get(&user_id)
    }

    /// Returns a member's net position: receivable minus payable across all
    /// counterparts.
    pub fn net(&self, user_id: UserId) -> Money {
        self.balances
            .get(&user_id)
            .map(|row| row.values().copied().sum())
            .unwrap_or(Money::ZERO)
    }

    /// Returns true if the member holds no outstanding balance with anyone.
    pub fn is_settled(&self, user_id: UserId) -> bool {
        self.balances
            .get(&user_id)
            .map(|row| row.values().all(Money::is_negligible))
            .unwrap_or(true)
    }

    /// Iterates over the members with a balance row.
    pub fn members(&self) -> impl Iterator<Item = UserId> + '_ {
        self.balances.keys().copied()
    }

    /// Number of pairwise debt relationships (each counted once).
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.balances.values().map(HashMap::len).sum();
        directed / 2
    }
}
