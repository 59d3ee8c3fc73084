//! Expense Domain
//!
//! This crate computes how an expense is divided between participants and
//! records the result as an immutable expense entry.
//!
//! Splitting is a pure function: given a total, the participants, and the
//! optional per-participant values, it either produces the full list of
//! shares or rejects the input before any ledger state is touched.

pub mod error;
pub mod expense;
pub mod split;

pub use error::ExpenseError;
pub use expense::Expense;
pub use split::{compute_splits, Split, SplitType};
