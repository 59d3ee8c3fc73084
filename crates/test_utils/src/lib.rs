//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! split ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `notify`: A recording notification channel for delivery tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod notify;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use notify::*;
