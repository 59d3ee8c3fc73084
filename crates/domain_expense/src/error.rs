//! Expense domain errors
//!
//! All variants are rejected-input errors: they are produced while validating
//! a split request, before any balance is mutated.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while computing or recording splits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// A split was requested with no participants
    #[error("Cannot split an expense with no participants")]
    EmptyParticipants,

    /// The expense total must be positive
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Exact and percentage splits need one value per participant
    #[error("Expected {expected} split values, got {got}")]
    ValueCountMismatch { expected: usize, got: usize },

    /// Exact and percentage splits were requested without values
    #[error("Split type {split_type} requires per-participant values")]
    MissingValues { split_type: &'static str },

    /// A share or percentage was negative
    #[error("Split values must be non-negative, got {0}")]
    NegativeValue(Decimal),

    /// Exact shares did not add up to the expense total
    #[error("Split amounts sum to {actual}, expected {expected}")]
    ShareSumMismatch { expected: Decimal, actual: Decimal },

    /// Percentages did not add up to 100
    #[error("Percentages sum to {actual}, expected 100")]
    PercentageSumMismatch { actual: Decimal },
}
