//! The ledger facade
//!
//! Owns the registries and the locking model: registries sit behind
//! `RwLock`, and every group or user is wrapped in its own `Mutex` so
//! mutating operations on one group serialize without blocking the rest.
//! Groups are disjoint, so no global lock is needed.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

use core_kernel::{ExpenseId, GroupId, Money, UserId};
use domain_expense::{compute_splits, Expense, Split, SplitType};
use domain_ledger::{BalanceGraph, Group, NoopNotifier, Notifier};

use crate::error::ServiceError;
use crate::user::User;

/// A user's individual balance position.
#[derive(Debug, Clone, Serialize)]
pub struct UserBalanceSummary {
    pub user_id: UserId,
    pub name: String,
    pub total_receivable: Money,
    pub total_payable: Money,
    pub counterparts: HashMap<UserId, Money>,
}

/// A user's standing within one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupBalanceView {
    pub group_id: GroupId,
    pub group_name: String,
    pub balances: HashMap<UserId, Money>,
    pub net: Money,
}

/// A user's balances aggregated across individual and group scopes.
#[derive(Debug, Clone, Serialize)]
pub struct UserOverview {
    pub individual: UserBalanceSummary,
    pub groups: Vec<GroupBalanceView>,
}

/// Top-level registry of users and groups.
///
/// Explicitly constructed and owned by whoever composes the application;
/// there is no ambient global instance.
pub struct LedgerService {
    users: RwLock<HashMap<UserId, Arc<Mutex<User>>>>,
    groups: RwLock<HashMap<GroupId, Arc<Mutex<Group>>>>,
    individual_expenses: Mutex<HashMap<ExpenseId, Expense>>,
    notifier: Arc<dyn Notifier>,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerService {
    /// Creates a service without a notification channel.
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(NoopNotifier))
    }

    /// Creates a service that fans out member notifications through the
    /// given channel.
    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            individual_expenses: Mutex::new(HashMap::new()),
            notifier,
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Registers a user and returns their id.
    pub fn create_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<UserId, ServiceError> {
        let user = User::new(name, email);
        let id = user.id;
        self.users
            .write()
            .map_err(|_| ServiceError::LockPoisoned("users"))?
            .insert(id, Arc::new(Mutex::new(user)));
        info!(user = %id, "user created");
        Ok(id)
    }

    /// Creates an empty group and returns its id.
    pub fn create_group(&self, name: impl Into<String>) -> Result<GroupId, ServiceError> {
        let group = Group::new(name);
        let id = group.id;
        self.groups
            .write()
            .map_err(|_| ServiceError::LockPoisoned("groups"))?
            .insert(id, Arc::new(Mutex::new(group)));
        info!(group = %id, "group created");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Group membership
    // ------------------------------------------------------------------

    /// Adds a registered user to a group.
    pub fn add_user_to_group(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<(), ServiceError> {
        self.user_handle(user_id)?;
        let group = self.group_handle(group_id)?;
        let mut group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        group.add_member(user_id)?;
        Ok(())
    }

    /// Removes a user from a group.
    ///
    /// Fails with the group's leave-guard error if the user still holds an
    /// outstanding balance with any member.
    pub fn remove_user_from_group(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<(), ServiceError> {
        self.user_handle(user_id)?;
        let group = self.group_handle(group_id)?;
        let mut group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        group.remove_member(user_id)?;
        Ok(())
    }

    /// Returns true if the user could leave the group right now.
    pub fn can_user_leave_group(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<bool, ServiceError> {
        let group = self.group_handle(group_id)?;
        let group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        Ok(group.can_user_leave(user_id)?)
    }

    // ------------------------------------------------------------------
    // Group expenses and settlements
    // ------------------------------------------------------------------

    /// Records an expense within a group.
    #[allow(clippy::too_many_arguments)]
    pub fn add_expense_to_group(
        &self,
        group_id: GroupId,
        description: &str,
        amount: Money,
        paid_by: UserId,
        participants: &[UserId],
        split_type: SplitType,
        values: Option<&[Decimal]>,
    ) -> Result<ExpenseId, ServiceError> {
        let group = self.group_handle(group_id)?;
        let mut group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        let expense_id = group.add_expense(
            description,
            amount,
            paid_by,
            participants,
            split_type,
            values,
            self.notifier.as_ref(),
        )?;
        Ok(expense_id)
    }

    /// Records a cash settlement between two group members.
    pub fn settle_payment_in_group(
        &self,
        group_id: GroupId,
        from: UserId,
        to: UserId,
        amount: Money,
    ) -> Result<(), ServiceError> {
        let group = self.group_handle(group_id)?;
        let mut group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        group.settle_payment(from, to, amount, self.notifier.as_ref())?;
        Ok(())
    }

    /// Collapses a group's balance graph into its simplified form.
    pub fn simplify_group_debts(&self, group_id: GroupId) -> Result<(), ServiceError> {
        let group = self.group_handle(group_id)?;
        let mut group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        group.simplify_debts();
        Ok(())
    }

    /// Returns a snapshot of a group's balance graph.
    pub fn group_balances(&self, group_id: GroupId) -> Result<BalanceGraph, ServiceError> {
        let group = self.group_handle(group_id)?;
        let group = group.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
        Ok(group.balances().clone())
    }

    // ------------------------------------------------------------------
    // Individual (non-group) transactions
    // ------------------------------------------------------------------

    /// Records a two-party expense outside any group.
    ///
    /// Uses the same split contract as group expenses with exactly two
    /// participants; the counterpart's share lands on both personal balance
    /// maps with opposite signs.
    pub fn add_individual_expense(
        &self,
        description: &str,
        amount: Money,
        paid_by: UserId,
        to: UserId,
        split_type: SplitType,
        values: Option<&[Decimal]>,
    ) -> Result<ExpenseId, ServiceError> {
        if paid_by == to {
            return Err(ServiceError::SameParty(paid_by.to_string()));
        }
        let payer_handle = self.user_handle(paid_by)?;
        let counterpart_handle = self.user_handle(to)?;

        let participants = [paid_by, to];
        let splits = compute_splits(split_type, amount, &participants, values)?;
        let expense = Expense::new(description, amount, paid_by, splits, None)?;

        {
            let (mut payer, mut counterpart) =
                lock_user_pair(&payer_handle, paid_by, &counterpart_handle, to)?;
            for Split { user_id, amount } in &expense.splits {
                if *user_id != paid_by {
                    payer.update_balance(*user_id, *amount);
                    counterpart.update_balance(paid_by, -*amount);
                }
            }
        }

        let expense_id = expense.id;
        self.individual_expenses
            .lock()
            .map_err(|_| ServiceError::LockPoisoned("individual_expenses"))?
            .insert(expense_id, expense);
        info!(expense = %expense_id, payer = %paid_by, amount = %amount, "individual expense recorded");

        let message = format!("New expense added: {description} ({amount})");
        for party in [paid_by, to] {
            if let Err(err) = self.notifier.notify(party, &message) {
                warn!(user = %party, error = %err, "notification dropped");
            }
        }
        Ok(expense_id)
    }

    /// Records a cash settlement between two users outside any group.
    pub fn settle_individual_payment(
        &self,
        from: UserId,
        to: UserId,
        amount: Money,
    ) -> Result<(), ServiceError> {
        if from == to {
            return Err(ServiceError::SameParty(from.to_string()));
        }
        let from_handle = self.user_handle(from)?;
        let to_handle = self.user_handle(to)?;

        {
            let (mut payer, mut receiver) = lock_user_pair(&from_handle, from, &to_handle, to)?;
            payer.update_balance(to, amount);
            receiver.update_balance(from, -amount);
        }
        info!(from = %from, to = %to, amount = %amount, "individual settlement recorded");

        let message = format!("Settlement: {from} paid {to} {amount}");
        for party in [from, to] {
            if let Err(err) = self.notifier.notify(party, &message) {
                warn!(user = %party, error = %err, "notification dropped");
            }
        }
        Ok(())
    }

    /// Looks up a recorded individual expense.
    pub fn individual_expense(&self, id: ExpenseId) -> Result<Option<Expense>, ServiceError> {
        Ok(self
            .individual_expenses
            .lock()
            .map_err(|_| ServiceError::LockPoisoned("individual_expenses"))?
            .get(&id)
            .cloned())
    }

    // ------------------------------------------------------------------
    // Balance views
    // ------------------------------------------------------------------

    /// Returns a user's individual balance position.
    pub fn user_balance_summary(&self, user_id: UserId) -> Result<UserBalanceSummary, ServiceError> {
        let handle = self.user_handle(user_id)?;
        let user = handle.lock().map_err(|_| ServiceError::LockPoisoned("user"))?;
        Ok(UserBalanceSummary {
            user_id,
            name: user.name.clone(),
            total_receivable: user.total_receivable(),
            total_payable: user.total_payable(),
            counterparts: user.balances().clone(),
        })
    }

    /// Aggregates a user's balances across their individual map and every
    /// group they belong to.
    pub fn user_overview(&self, user_id: UserId) -> Result<UserOverview, ServiceError> {
        let individual = self.user_balance_summary(user_id)?;

        let handles: Vec<Arc<Mutex<Group>>> = {
            let groups = self
                .groups
                .read()
                .map_err(|_| ServiceError::LockPoisoned("groups"))?;
            groups.values().cloned().collect()
        };

        let mut views = Vec::new();
        for handle in handles {
            let group = handle.lock().map_err(|_| ServiceError::LockPoisoned("group"))?;
            if group.is_member(user_id) {
                views.push(GroupBalanceView {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    balances: group.user_balances(user_id)?,
                    net: group.balances().net(user_id),
                });
            }
        }
        views.sort_by(|a, b| a.group_name.cmp(&b.group_name).then(a.group_id.cmp(&b.group_id)));

        Ok(UserOverview {
            individual,
            groups: views,
        })
    }

    // ------------------------------------------------------------------
    // Registry lookups
    // ------------------------------------------------------------------

    fn user_handle(&self, id: UserId) -> Result<Arc<Mutex<User>>, ServiceError> {
        self.users
            .read()
            .map_err(|_| ServiceError::LockPoisoned("users"))?
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("user", id))
    }

    fn group_handle(&self, id: GroupId) -> Result<Arc<Mutex<Group>>, ServiceError> {
        self.groups
            .read()
            .map_err(|_| ServiceError::LockPoisoned("groups"))?
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("group", id))
    }
}

/// Locks two distinct users in a deterministic (id-sorted) order so
/// concurrent two-party operations cannot deadlock, returning the guards in
/// the caller's (first, second) order.
fn lock_user_pair<'a>(
    first_handle: &'a Arc<Mutex<User>>,
    first: UserId,
    second_handle: &'a Arc<Mutex<User>>,
    second: UserId,
) -> Result<
    (
        std::sync::MutexGuard<'a, User>,
        std::sync::MutexGuard<'a, User>,
    ),
    ServiceError,
> {
    let poisoned = |_| ServiceError::LockPoisoned("user");
    if first <= second {
        let a = first_handle.lock().map_err(poisoned)?;
        let b = second_handle.lock().map_err(poisoned)?;
        Ok((a, b))
    } else {
        let b = second_handle.lock().map_err(poisoned)?;
        let a = first_handle.lock().map_err(poisoned)?;
        Ok((a, b))
    }
}
