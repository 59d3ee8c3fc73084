//! Group aggregate
//!
//! A group owns its membership, balance graph, and expense history, and is
//! the unit of consistency for expense application: requests are validated
//! fully before any balance is touched, so a returned error always means the
//! group is unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use core_kernel::{ExpenseId, GroupId, Money, UserId};
use domain_expense::{compute_splits, Expense, Split, SplitType};

use crate::balance::BalanceGraph;
use crate::error::LedgerError;
use crate::notify::Notifier;
use crate::simplify::simplify_debts;

/// A group of users sharing expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Insertion order doubles as notification order
    members: Vec<UserId>,
    balances: BalanceGraph,
    expenses: HashMap<ExpenseId, Expense>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new_v7(),
            name: name.into(),
            members: Vec::new(),
            balances: BalanceGraph::new(),
            expenses: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns the members in insertion order.
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.balances.contains(user_id)
    }

    /// Adds a member with an empty balance row.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateMember`] if the user is already in
    /// the group.
    pub fn add_member(&mut self, user_id: UserId) -> Result<(), LedgerError> {
        if self.is_member(user_id) {
            return Err(LedgerError::DuplicateMember(user_id));
        }
        self.members.push(user_id);
        self.balances.add_member(user_id);
        info!(group = %self.id, user = %user_id, "member added");
        Ok(())
    }

    /// Removes a member, clearing their row and column from the graph.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotAMember`] if the user is not in the group
    /// - [`LedgerError::OutstandingBalance`] if any counterpart balance is
    ///   above the settlement epsilon
    pub fn remove_member(&mut self, user_id: UserId) -> Result<(), LedgerError> {
        if !self.can_user_leave(user_id)? {
            return Err(LedgerError::OutstandingBalance(user_id));
        }
        self.members.retain(|&m| m != user_id);
        self.balances.remove_member(user_id);
        info!(group = %self.id, user = %user_id, "member removed");
        Ok(())
    }

    /// Returns true if the member holds no outstanding balance with anyone.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotAMember`] for unknown users.
    pub fn can_user_leave(&self, user_id: UserId) -> Result<bool, LedgerError> {
        if !self.is_member(user_id) {
            return Err(LedgerError::NotAMember(user_id));
        }
        Ok(self.balances.is_settled(user_id))
    }

    /// Returns a snapshot of a member's balances against each counterpart.
    pub fn user_balances(&self, user_id: UserId) -> Result<HashMap<UserId, Money>, LedgerError> {
        if !self.is_member(user_id) {
            return Err(LedgerError::NotAMember(user_id));
        }
        Ok(self.balances.row(user_id).cloned().unwrap_or_default())
    }

    /// Records an expense and applies the resulting splits to the graph.
    ///
    /// The payer gains a positive balance against every other participant
    /// for that participant's share. Members are notified after the state is
    /// committed; delivery failures are logged and swallowed.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotAMember`] if the payer or any participant is
    ///   outside the group
    /// - [`LedgerError::Split`] if the split request is malformed
    #[allow(clippy::too_many_arguments)]
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: Money,
        paid_by: UserId,
        participants: &[UserId],
        split_type: SplitType,
        values: Option<&[Decimal]>,
        notifier: &dyn Notifier,
    ) -> Result<ExpenseId, LedgerError> {
        if !self.is_member(paid_by) {
            return Err(LedgerError::NotAMember(paid_by));
        }
        if let Some(&outsider) = participants.iter().find(|&&p| !self.is_member(p)) {
            return Err(LedgerError::NotAMember(outsider));
        }

        // Splits and the expense record are both validated before any
        // balance update, keeping the mutation all-or-nothing.
        let splits = compute_splits(split_type, amount, participants, values)?;
        let expense = Expense::new(description, amount, paid_by, splits, Some(self.id))?;

        for Split { user_id, amount } in &expense.splits {
            if *user_id != paid_by {
                self.balances.adjust(paid_by, *user_id, *amount);
            }
        }

        let expense_id = expense.id;
        self.expenses.insert(expense_id, expense);
        info!(
            group = %self.id,
            expense = %expense_id,
            amount = %amount,
            split = %split_type,
            "expense recorded"
        );

        self.notify_members(notifier, &format!("New expense added: {description} ({amount})"));
        Ok(expense_id)
    }

    /// Records a cash settlement from one member to another.
    ///
    /// Reduces the payer's debt toward the receiver. Paying more than owed
    /// is allowed and flips the sign of the pairwise balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotAMember`] for unknown users.
    pub fn settle_payment(
        &mut self,
        from: UserId,
        to: UserId,
        amount: Money,
        notifier: &dyn Notifier,
    ) -> Result<(), LedgerError> {
        if !self.is_member(from) {
            return Err(LedgerError::NotAMember(from));
        }
        if !self.is_member(to) {
            return Err(LedgerError::NotAMember(to));
        }

        self.balances.adjust(from, to, amount);
        info!(group = %self.id, from = %from, to = %to, amount = %amount, "settlement recorded");

        self.notify_members(notifier, &format!("Settlement: {from} paid {to} {amount}"));
        Ok(())
    }

    /// Replaces the balance graph with its simplified form.
    ///
    /// Every member's net position is preserved; only the pairwise edges
    /// change.
    pub fn simplify_debts(&mut self) {
        let before = self.balances.edge_count();
        self.balances = simplify_debts(&self.balances);
        info!(
            group = %self.id,
            edges_before = before,
            edges_after = self.balances.edge_count(),
            "debts simplified"
        );
    }

    /// Returns the current balance graph.
    pub fn balances(&self) -> &BalanceGraph {
        &self.balances
    }

    /// Looks up a recorded expense.
    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.get(&id)
    }

    /// Iterates over the expense history (unordered; sort by `created_at`
    /// for presentation).
    pub fn expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.values()
    }

    fn notify_members(&self, notifier: &dyn Notifier, message: &str) {
        for &member in &self.members {
            if let Err(err) = notifier.notify(member, message) {
                warn!(group = %self.id, user = %member, error = %err, "notification dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use rust_decimal_macros::dec;

    fn group_with_members(n: usize) -> (Group, Vec<UserId>) {
        let mut group = Group::new("Trip");
        let members: Vec<UserId> = (0..n).map(|_| UserId::new()).collect();
        for &m in &members {
            group.add_member(m).unwrap();
        }
        (group, members)
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let (mut group, members) = group_with_members(1);
        let err = group.add_member(members[0]).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateMember(members[0]));
    }

    #[test]
    fn test_add_expense_updates_balances() {
        let (mut group, members) = group_with_members(4);

        group
            .add_expense(
                "Lunch",
                Money::new(dec!(800)),
                members[0],
                &members,
                SplitType::Equal,
                None,
                &NoopNotifier,
            )
            .unwrap();

        for &other in &members[1..] {
            assert_eq!(group.balances().get(members[0], other), Money::new(dec!(200)));
        }
        assert_eq!(group.balances().net(members[0]), Money::new(dec!(600)));
        assert_eq!(group.expenses().count(), 1);
    }

    #[test]
    fn test_expense_with_outsider_participant_rejected() {
        let (mut group, members) = group_with_members(2);
        let outsider = UserId::new();
        let participants = vec![members[0], outsider];

        let err = group
            .add_expense(
                "Dinner",
                Money::new(dec!(100)),
                members[0],
                &participants,
                SplitType::Equal,
                None,
                &NoopNotifier,
            )
            .unwrap_err();

        assert_eq!(err, LedgerError::NotAMember(outsider));
        assert_eq!(group.expenses().count(), 0);
        assert!(group.balances().is_settled(members[0]));
    }

    #[test]
    fn test_failed_split_leaves_balances_untouched() {
        let (mut group, members) = group_with_members(2);
        let values = [dec!(60), dec!(50)];

        let result = group.add_expense(
            "Groceries",
            Money::new(dec!(100)),
            members[0],
            &members,
            SplitType::Percentage,
            Some(&values),
            &NoopNotifier,
        );

        assert!(result.is_err());
        assert!(group.balances().is_settled(members[0]));
        assert!(group.balances().is_settled(members[1]));
    }

    #[test]
    fn test_settlement_overshoot_flips_sign() {
        let (mut group, members) = group_with_members(2);
        let (payer, ower) = (members[0], members[1]);

        group
            .add_expense(
                "Taxi",
                Money::new(dec!(100)),
                payer,
                &members,
                SplitType::Equal,
                None,
                &NoopNotifier,
            )
            .unwrap();
        assert_eq!(group.balances().get(payer, ower), Money::new(dec!(50)));

        // ower pays back 80 against a 50 debt
        group
            .settle_payment(ower, payer, Money::new(dec!(80)), &NoopNotifier)
            .unwrap();

        assert_eq!(group.balances().get(ower, payer), Money::new(dec!(30)));
        assert_eq!(group.balances().get(payer, ower), Money::new(dec!(-30)));
    }

    #[test]
    fn test_leave_guard() {
        let (mut group, members) = group_with_members(2);
        let (payer, ower) = (members[0], members[1]);

        group
            .add_expense(
                "Coffee",
                Money::new(dec!(40)),
                payer,
                &members,
                SplitType::Equal,
                None,
                &NoopNotifier,
            )
            .unwrap();

        assert_eq!(
            group.remove_member(ower).unwrap_err(),
            LedgerError::OutstandingBalance(ower)
        );

        group
            .settle_payment(ower, payer, Money::new(dec!(20)), &NoopNotifier)
            .unwrap();

        group.remove_member(ower).unwrap();
        assert!(!group.is_member(ower));
        assert_eq!(group.members().len(), 1);
    }

    #[test]
    fn test_can_user_leave_unknown_user() {
        let (group, _) = group_with_members(1);
        let stranger = UserId::new();
        assert_eq!(
            group.can_user_leave(stranger).unwrap_err(),
            LedgerError::NotAMember(stranger)
        );
    }
}
