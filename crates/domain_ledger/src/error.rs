//! Ledger domain errors

use core_kernel::UserId;
use domain_expense::ExpenseError;
use thiserror::Error;

/// Errors that can occur while mutating or querying a group ledger.
///
/// Every variant is detected before any balance update, so a returned error
/// always means the group state is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The referenced user is not a member of the group
    #[error("User {0} is not a member of this group")]
    NotAMember(UserId),

    /// The user is already a member of the group
    #[error("User {0} is already a member of this group")]
    DuplicateMember(UserId),

    /// The user still owes or is owed money within the group
    #[error("User {0} has outstanding balances and cannot leave the group")]
    OutstandingBalance(UserId),

    /// The split request was malformed
    #[error("Split error: {0}")]
    Split(#[from] ExpenseError),
}
