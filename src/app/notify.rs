// src/app/notify.rs

//! Notification collaborators.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::utils::log;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

/// Receives user-facing, non-blocking messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Prints notifications as console log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => log::success(message),
            Severity::Error => log::error(message),
        }
    }
}

/// A transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// Holds the latest toast and drops it once its display time has passed.
/// A new toast replaces the previous one.
#[derive(Debug)]
pub struct ToastNotifier {
    display: Duration,
    slot: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    toast: Option<Toast>,
    /// Not yet handed out by `take_new`
    unseen: bool,
}

impl Slot {
    fn expire(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| Instant::now() >= t.expires_at)
        {
            self.toast = None;
            self.unseen = false;
        }
    }
}

impl ToastNotifier {
    pub fn new(display: Duration) -> Self {
        Self {
            display,
            slot: Mutex::new(Slot::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The live toast if it has not been handed out before. Each toast is
    /// returned at most once.
    pub fn take_new(&self) -> Option<Toast> {
        let mut slot = self.lock();
        slot.expire();
        if !slot.unseen {
            return None;
        }
        slot.unseen = false;
        slot.toast.clone()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let toast = Toast {
            message: message.to_string(),
            severity,
            expires_at: Instant::now() + self.display,
        };
        let mut slot = self.lock();
        slot.toast = Some(toast);
        slot.unseen = true;
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Keeps every notification for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
