//! Recording notification channel for delivery tests.

use std::sync::Mutex;

use core_kernel::UserId;
use domain_ledger::{Notifier, NotifyError};

/// Captures every delivered notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything delivered so far.
    pub fn delivered(&self) -> Vec<(UserId, String)> {
        self.delivered.lock().unwrap().clone()
    }

    /// Returns the messages delivered to one user.
    pub fn messages_for(&self, user_id: UserId) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, user_id: UserId, message: &str) -> Result<(), NotifyError> {
        self.delivered
            .lock()
            .unwrap()
            .push((user_id, message.to_string()));
        Ok(())
    }
}

/// Fails every delivery, for exercising the fire-and-forget contract.
#[derive(Debug, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _user_id: UserId, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError("channel unavailable".to_string()))
    }
}
