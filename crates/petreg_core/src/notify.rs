//! User-facing notification port.
//!
//! # Responsibility
//! - Let the registry raise blocking alerts without depending on a UI.
//!
//! # Invariants
//! - Raising an alert never fails and never panics.

use log::warn;
use parking_lot::Mutex;

/// Alert raised when `add` rejects a duplicate name.
pub const DUPLICATE_PET_MESSAGE: &str = "Duplicate pet detected. Pet not added.";
/// Alert raised when `update` would rename onto an existing name.
pub const DUPLICATE_PET_UPDATE_MESSAGE: &str = "Duplicate pet detected. Pet not updated.";

/// Sink for user-visible alerts.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("event=user_alert module=notify status=raised message={message:?}");
    }
}

/// Collects alerts until a UI drains and displays them.
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: Mutex<Vec<String>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending alert, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Notifier for AlertQueue {
    fn alert(&self, message: &str) {
        LogNotifier.alert(message);
        self.pending.lock().push(message.to_string());
    }
}
