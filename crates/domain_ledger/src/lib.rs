//! Group Ledger Domain
//!
//! This crate owns one group's balances and is the unit of consistency for
//! expense application.
//!
//! # Invariants
//!
//! - The balance graph is anti-symmetric: `balance[a][b] == -balance[b][a]`
//! - Entries below the settlement epsilon are removed, never stored as zero
//! - Expense application is all-or-nothing: input is fully validated before
//!   any balance changes
//! - A member cannot leave while holding an outstanding balance

pub mod balance;
pub mod error;
pub mod group;
pub mod notify;
pub mod simplify;

pub use balance::BalanceGraph;
pub use error::LedgerError;
pub use group::Group;
pub use notify::{NoopNotifier, Notifier, NotifyError};
pub use simplify::simplify_debts;
