use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Broadcast-once stop flag shared by search workers.
///
/// Firing never blocks and may be repeated; once fired it stays fired.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    fired: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake every waiter. Returns `true` on the first call.
    pub fn fire(&self) -> bool {
        let first = !self.inner.fired.swap(true, Ordering::AcqRel);
        self.inner.notify.notify_waiters();
        first
    }

    pub fn is_fired(&self) -> bool {
        self.inner.fired.load(Ordering::Acquire)
    }

    /// Resolve once the signal has fired.
    pub async fn fired(&self) {
        loop {
            // registered before the flag check so a concurrent fire is not lost
            let notified = self.inner.notify.notified();
            if self.is_fired() {
                return;
            }
            notified.await;
        }
    }
}
