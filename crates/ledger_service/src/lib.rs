//! Ledger Service
//!
//! Top-level facade over the split ledger: owns the user and group
//! registries, routes expense and settlement requests to the right group,
//! handles individual (non-group) expenses, and aggregates a user's
//! balances across groups for display.
//!
//! All client-facing operations resolve identifiers first and delegate to
//! the domain crates; unknown ids surface as [`ServiceError::NotFound`]
//! before anything is mutated.

pub mod error;
pub mod service;
pub mod user;

pub use error::ServiceError;
pub use service::{GroupBalanceView, LedgerService, UserBalanceSummary, UserOverview};
pub use user::User;
