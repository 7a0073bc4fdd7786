//! One-shot completion signal
//!
//! A value that resolves exactly once, to the final total count. Any number
//! of tasks may race to fulfill it; the first attempt wins and every later
//! attempt is a no-op. Any number of waiters observe the same final value.
//!
//! Built from an atomic first-wins flag plus a `tokio::sync::watch` channel
//! rather than a library complete-once type, so the exactly-once guarantee is
//! explicit in this code.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

/// Single-resolution signal carrying the final total count
#[derive(Clone)]
pub struct Completion {
    fulfilled: Arc<AtomicBool>,
    tx: watch::Sender<Option<u64>>,
    rx: watch::Receiver<Option<u64>>,
}

impl Completion {
    /// Create an unfulfilled signal
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            fulfilled: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
        }
    }

    /// Attempt to fulfill the signal with the final total
    ///
    /// Returns `true` for the single winning attempt; every other attempt
    /// returns `false` and leaves the resolved value untouched.
    pub fn fulfill(&self, total: u64) -> bool {
        if self.fulfilled.swap(true, Ordering::AcqRel) {
            return false;
        }
        // The swap above guarantees a single sender reaches this point.
        let _ = self.tx.send(Some(total));
        true
    }

    /// Whether the signal has been fulfilled
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled.load(Ordering::Acquire)
    }

    /// Wait until the signal resolves and return the final total
    ///
    /// Returns immediately if already fulfilled. Every waiter observes the
    /// same value.
    pub async fn wait(&self) -> u64 {
        let mut rx = self.rx.clone();
        if let Ok(value) = rx.wait_for(|value| value.is_some()).await {
            if let Some(total) = *value {
                return total;
            }
        }
        // Unreachable while a Completion clone holds the sender; the watch
        // channel cannot close before fulfillment.
        0
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("fulfilled", &self.is_fulfilled())
            .finish()
    }
}
