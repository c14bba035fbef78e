//! Route-change watcher.
//!
//! Single-page-app hosts swap views without a full reload, so the engine
//! must rerun after client-side navigation. Instead of patching a global
//! history object, the host registers itself as the event source and calls
//! [`RouteWatcher::notify`] for every push/replace/back-forward transition.
//!
//! Each event arms a settle-delay timer (letting the new view's DOM finish
//! rendering); an event arriving while a timer is pending cancels it, so a
//! burst of navigations produces exactly one rerun. Rerun signals go out on
//! a bounded channel consumed by [`crate::Engine::watch`], which serializes
//! runs - two reruns can never race to write the same page.
//!
//! State machine: Idle -> (event) -> Pending(timer) -> (fire) -> Idle+rerun;
//! a new event in Pending replaces the timer.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A client-side navigation observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// A new history entry was pushed.
    Pushed,
    /// The current history entry was replaced.
    Replaced,
    /// The visitor navigated back or forward.
    Popped,
}

/// Debounced settle timer turning navigation events into rerun signals.
pub struct RouteWatcher {
    settle_delay: Duration,
    rerun_tx: mpsc::Sender<()>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RouteWatcher {
    /// Create a watcher and the rerun receiver its signals arrive on.
    ///
    /// Must be called within a tokio runtime; `notify` spawns the settle
    /// timer task.
    #[must_use]
    pub fn channel(settle_delay: Duration) -> (Self, mpsc::Receiver<()>) {
        let (rerun_tx, rerun_rx) = mpsc::channel(1);
        (
            Self {
                settle_delay,
                rerun_tx,
                pending: Mutex::new(None),
            },
            rerun_rx,
        )
    }

    /// Record a navigation event, (re)arming the settle timer.
    pub fn notify(&self, event: RouteEvent) {
        debug!(?event, "route change observed");

        let tx = self.rerun_tx.clone();
        let delay = self.settle_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Full channel means a rerun is already queued; coalesce.
            let _ = tx.try_send(());
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for RouteWatcher {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(750);

    #[tokio::test(start_paused = true)]
    async fn test_event_burst_collapses_to_one_rerun() {
        let (watcher, mut rerun_rx) = RouteWatcher::channel(SETTLE);

        watcher.notify(RouteEvent::Pushed);
        watcher.notify(RouteEvent::Replaced);
        watcher.notify(RouteEvent::Popped);

        tokio::time::sleep(SETTLE * 2).await;

        assert!(rerun_rx.try_recv().is_ok());
        assert!(rerun_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_events_each_rerun() {
        let (watcher, mut rerun_rx) = RouteWatcher::channel(SETTLE);

        watcher.notify(RouteEvent::Pushed);
        tokio::time::sleep(SETTLE * 2).await;
        assert!(rerun_rx.try_recv().is_ok());

        watcher.notify(RouteEvent::Popped);
        tokio::time::sleep(SETTLE * 2).await;
        assert!(rerun_rx.try_recv().is_ok());
        assert!(rerun_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_rerun_before_settle_delay() {
        let (watcher, mut rerun_rx) = RouteWatcher::channel(SETTLE);

        watcher.notify(RouteEvent::Pushed);
        tokio::time::sleep(SETTLE / 2).await;

        assert!(rerun_rx.try_recv().is_err());
    }
}
