// src/app/debounce.rs

//! Delay-and-cancel scheduling for search-as-you-type.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Collapses bursts of values into one delivery.
///
/// Each [`schedule`](Debouncer::schedule) aborts the pending timer, if any,
/// and starts a new one. When a timer survives the quiet window its value is
/// sent on the channel returned by [`Debouncer::new`]. At most one timer is
/// alive at a time.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver that yields settled values.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Schedule `value` for delivery after the quiet window, replacing any
    /// pending value. Must be called within a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let quiet = self.quiet;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Receiver gone means the session ended; nothing to deliver to.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a timer is waiting out the quiet window.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
