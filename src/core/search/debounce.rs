//! Cancelable trailing-edge debounce timer.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet period before a quick search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Holds at most one scheduled action; scheduling again cancels the previous one.
///
/// The action runs on the timer task once the quiet period elapses. Work that
/// must outlive a later cancellation (network fetches) should be spawned from
/// inside the action rather than awaited there.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending action with `action`, firing after the quiet period.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Drop the pending action if it has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an action is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
