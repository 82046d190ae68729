//! Push-updated query results.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A query result that refreshes itself whenever the note store changes.
///
/// Holds the latest snapshot. Dropping the handle stops the background refresh.
pub struct LiveQuery<T> {
    receiver: watch::Receiver<T>,
    refresh: JoinHandle<()>,
}

impl<T: Clone> LiveQuery<T> {
    pub(crate) const fn new(receiver: watch::Receiver<T>, refresh: JoinHandle<()>) -> Self {
        Self { receiver, refresh }
    }

    /// Latest snapshot
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait until the result differs from the last one seen.
    ///
    /// Returns `None` once the store has been closed.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Call `callback` with the current snapshot and then with every update,
    /// until the store is closed.
    pub async fn for_each<F>(mut self, mut callback: F)
    where
        F: FnMut(&T),
    {
        let snapshot = self.receiver.borrow_and_update().clone();
        callback(&snapshot);

        while let Some(snapshot) = self.changed().await {
            callback(&snapshot);
        }
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        self.refresh.abort();
    }
}
