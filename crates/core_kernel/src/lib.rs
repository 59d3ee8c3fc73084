//! Core Kernel - Foundational types for the split ledger
//!
//! This crate provides the building blocks shared by every domain module:
//! - A precise `Money` type carrying the settlement epsilon used throughout
//!   the ledger (balances below it are treated as settled)
//! - Strongly-typed identifiers for users, groups, and expenses

pub mod identifiers;
pub mod money;

pub use identifiers::{ExpenseId, GroupId, UserId};
pub use money::{Money, SETTLEMENT_EPSILON};
