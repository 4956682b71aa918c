// SPDX-License-Identifier: MIT

//! User-facing notifications

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Sink for warnings shown in the host UI
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards notifications to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Collects warnings in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first
    pub fn warnings(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        assert!(notifier.is_empty());

        notifier.warn("first");
        notifier.warn("second");

        assert!(!notifier.is_empty());
        assert_eq!(notifier.warnings(), vec!["first", "second"]);
    }

    #[test]
    fn test_log_notifier_does_not_panic_without_logger() {
        LogNotifier.warn("world");
    }
}
