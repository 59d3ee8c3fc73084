//! Service-level errors

use domain_expense::ExpenseError;
use domain_ledger::LedgerError;
use std::fmt;
use thiserror::Error;

/// Errors surfaced by the ledger facade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced user or group does not exist
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A group-level rule rejected the request
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A split request was malformed
    #[error("Split error: {0}")]
    Expense(#[from] ExpenseError),

    /// Both sides of a two-party transaction name the same user
    #[error("Both parties are the same user: {0}")]
    SameParty(String),

    /// A registry or entity lock was poisoned by a panicked caller
    #[error("Internal lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

impl ServiceError {
    /// Creates a NotFound error for an entity type and id.
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true if this error means a referenced id was unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}
