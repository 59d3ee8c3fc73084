//! Member notification fan-out
//!
//! Notification delivery is an external collaborator (push, email, chat).
//! The ledger only requires fire-and-forget semantics: delivery failures are
//! logged by the caller and never fail the committed mutation.

use core_kernel::UserId;
use thiserror::Error;

/// A failed notification delivery.
#[derive(Debug, Error)]
#[error("Notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivery channel for member notifications.
pub trait Notifier: Send + Sync {
    /// Delivers one message to one user.
    fn notify(&self, user_id: UserId, message: &str) -> Result<(), NotifyError>;
}

/// A notifier that drops every message.
///
/// Useful in tests and when embedding the ledger without a delivery channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _user_id: UserId, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
