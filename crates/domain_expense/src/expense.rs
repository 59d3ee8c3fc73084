//! The immutable expense record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ExpenseId, GroupId, Money, UserId, SETTLEMENT_EPSILON};

use crate::error::ExpenseError;
use crate::split::Split;

/// A recorded spend event and its resulting splits.
///
/// Immutable once created: the ledger appends expenses to history and never
/// edits them. `group_id` is `None` for individual (two-party) expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub total_amount: Money,
    pub paid_by: UserId,
    pub splits: Vec<Split>,
    pub group_id: Option<GroupId>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a new expense record.
    ///
    /// # Errors
    ///
    /// Returns an error if the splits do not sum to the total within the
    /// settlement epsilon, or if any split amount is negative.
    pub fn new(
        description: impl Into<String>,
        total_amount: Money,
        paid_by: UserId,
        splits: Vec<Split>,
        group_id: Option<GroupId>,
    ) -> Result<Self, ExpenseError> {
        if let Some(negative) = splits.iter().find(|s| s.amount.amount().is_sign_negative()) {
            return Err(ExpenseError::NegativeValue(negative.amount.amount()));
        }

        let sum: Money = splits.iter().map(|s| s.amount).sum();
        if (sum.amount() - total_amount.amount()).abs() >= SETTLEMENT_EPSILON {
            return Err(ExpenseError::ShareSumMismatch {
                expected: total_amount.amount(),
                actual: sum.amount(),
            });
        }

        Ok(Self {
            id: ExpenseId::new_v7(),
            description: description.into(),
            total_amount,
            paid_by,
            splits,
            group_id,
            created_at: Utc::now(),
        })
    }

    /// Returns the share owed by a participant, if they are part of the expense.
    pub fn share_of(&self, user_id: UserId) -> Option<Money> {
        self.splits
            .iter()
            .find(|s| s.user_id == user_id)
            .map(|s| s.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_creation() {
        let payer = UserId::new();
        let other = UserId::new();
        let splits = vec![
            Split::new(payer, Money::new(dec!(50))),
            Split::new(other, Money::new(dec!(50))),
        ];

        let expense =
            Expense::new("Lunch", Money::new(dec!(100)), payer, splits, None).unwrap();

        assert_eq!(expense.total_amount, Money::new(dec!(100)));
        assert_eq!(expense.share_of(other), Some(Money::new(dec!(50))));
        assert!(expense.group_id.is_none());
    }

    #[test]
    fn test_expense_rejects_mismatched_splits() {
        let payer = UserId::new();
        let splits = vec![Split::new(payer, Money::new(dec!(30)))];

        let result = Expense::new("Broken", Money::new(dec!(100)), payer, splits, None);
        assert!(matches!(result, Err(ExpenseError::ShareSumMismatch { .. })));
    }

    #[test]
    fn test_expense_tolerates_sub_cent_residue() {
        let users: Vec<UserId> = (0..3).map(|_| UserId::new()).collect();
        let share = Money::new(dec!(100) / dec!(3));
        let splits = users.iter().map(|&u| Split::new(u, share)).collect();

        let expense = Expense::new("Thirds", Money::new(dec!(100)), users[0], splits, None);
        assert!(expense.is_ok());
    }
}
