//! User-facing notifications.

use std::sync::Mutex;
use tracing::info;

/// Blocking, one-line messages to the user (success and failure of writes).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Sends alerts to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        info!(alert = message, "user notification");
    }
}

/// Keeps every alert in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.alert("Asset Tokenized!");
        notifier.alert("Property Updated Successfully!");
        assert_eq!(notifier.messages().len(), 2);
        assert_eq!(notifier.last().as_deref(), Some("Property Updated Successfully!"));
    }
}
