//! Split strategies
//!
//! Three fixed strategies exist and no external extensibility is needed, so
//! dispatch is a tagged enum matched in [`compute_splits`] rather than a
//! trait object per strategy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Money, UserId, SETTLEMENT_EPSILON};

use crate::error::ExpenseError;

/// How an expense total is divided between participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    /// Every participant owes the same share
    Equal,
    /// Each participant owes the literal amount supplied for them
    Exact,
    /// Each participant owes a percentage (0-100) of the total
    Percentage,
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitType::Equal => write!(f, "equal"),
            SplitType::Exact => write!(f, "exact"),
            SplitType::Percentage => write!(f, "percentage"),
        }
    }
}

/// One participant's computed share of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub user_id: UserId,
    pub amount: Money,
}

impl Split {
    pub fn new(user_id: UserId, amount: Money) -> Self {
        Self { user_id, amount }
    }
}

/// Computes per-participant shares for an expense.
///
/// Validates the full request before returning: the output either covers
/// every participant with a non-negative share summing to `total` (within
/// the settlement epsilon), or the whole request is rejected.
///
/// `values` is ignored for [`SplitType::Equal`] and mandatory for the other
/// two strategies, aligned index-by-index with `participants`.
pub fn compute_splits(
    split_type: SplitType,
    total: Money,
    participants: &[UserId],
    values: Option<&[Decimal]>,
) -> Result<Vec<Split>, ExpenseError> {
    if participants.is_empty() {
        return Err(ExpenseError::EmptyParticipants);
    }
    if total.amount() <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveAmount(total.amount()));
    }

    match split_type {
        SplitType::Equal => split_equal(total, participants),
        SplitType::Exact => {
            let values = required_values(split_type, participants, values)?;
            split_exact(total, participants, values)
        }
        SplitType::Percentage => {
            let values = required_values(split_type, participants, values)?;
            split_percentage(total, participants, values)
        }
    }
}

fn required_values<'a>(
    split_type: SplitType,
    participants: &[UserId],
    values: Option<&'a [Decimal]>,
) -> Result<&'a [Decimal], ExpenseError> {
    let values = values.filter(|v| !v.is_empty()).ok_or(ExpenseError::MissingValues {
        split_type: match split_type {
            SplitType::Exact => "exact",
            _ => "percentage",
        },
    })?;

    if values.len() != participants.len() {
        return Err(ExpenseError::ValueCountMismatch {
            expected: participants.len(),
            got: values.len(),
        });
    }
    if let Some(negative) = values.iter().find(|v| v.is_sign_negative()) {
        return Err(ExpenseError::NegativeValue(*negative));
    }
    Ok(values)
}

fn split_equal(total: Money, participants: &[UserId]) -> Result<Vec<Split>, ExpenseError> {
    let share = Money::new(total.amount() / Decimal::from(participants.len()));
    Ok(participants
        .iter()
        .map(|&user_id| Split::new(user_id, share))
        .collect())
}

fn split_exact(
    total: Money,
    participants: &[UserId],
    values: &[Decimal],
) -> Result<Vec<Split>, ExpenseError> {
    let sum: Decimal = values.iter().sum();
    if (sum - total.amount()).abs() >= SETTLEMENT_EPSILON {
        return Err(ExpenseError::ShareSumMismatch {
            expected: total.amount(),
            actual: sum,
        });
    }

    Ok(participants
        .iter()
        .zip(values)
        .map(|(&user_id, &amount)| Split::new(user_id, Money::new(amount)))
        .collect())
}

fn split_percentage(
    total: Money,
    participants: &[UserId],
    values: &[Decimal],
) -> Result<Vec<Split>, ExpenseError> {
    let sum: Decimal = values.iter().sum();
    if (sum - dec!(100)).abs() >= SETTLEMENT_EPSILON {
        return Err(ExpenseError::PercentageSumMismatch { actual: sum });
    }

    Ok(participants
        .iter()
        .zip(values)
        .map(|(&user_id, &pct)| Split::new(user_id, Money::new(total.amount() * pct / dec!(100))))
        .collect())
}
