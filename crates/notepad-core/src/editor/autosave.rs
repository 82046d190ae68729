use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Idle time after the last edit before an auto-save fires.
pub const AUTO_SAVE_DELAY: Duration = Duration::from_secs(1);

struct PendingSave {
    timer: JoinHandle<()>,
    // Set exactly once, either by the timer when it fires or by `cancel`
    claimed: Arc<AtomicBool>,
}

/// Cancellable delayed save.
///
/// Scheduling replaces the pending save so the latest edit wins. A save that
/// has started runs to completion even if cancelled afterwards.
pub struct AutoSaver {
    delay: Duration,
    pending: Option<PendingSave>,
}

impl Default for AutoSaver {
    fn default() -> Self {
        Self::new(AUTO_SAVE_DELAY)
    }
}

impl AutoSaver {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `save` once the delay elapses without another call to `schedule`.
    pub fn schedule<F>(&mut self, save: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let claimed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&claimed);
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if flag.swap(true, Ordering::SeqCst) {
                return;
            }
            tracing::debug!("Auto-save fired");
            tokio::spawn(save);
        });

        self.pending = Some(PendingSave { timer, claimed });
    }

    /// Prevent the pending save from firing.
    ///
    /// Returns `true` if a save was pending and will not run.
    pub fn cancel(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if pending.claimed.swap(true, Ordering::SeqCst) {
            return false;
        }
        pending.timer.abort();
        true
    }

    /// Whether a save is scheduled and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.claimed.load(Ordering::SeqCst))
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn recorder(counter: &Arc<AtomicUsize>, amount: usize) -> impl Future<Output = ()> + Send {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(amount, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut saver = AutoSaver::default();

        saver.schedule(recorder(&counter, 1));
        assert!(saver.is_pending());

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!saver.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn latest_schedule_wins() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut saver = AutoSaver::default();

        saver.schedule(recorder(&counter, 1));
        tokio::time::sleep(Duration::from_millis(500)).await;
        saver.schedule(recorder(&counter, 10));
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_save() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut saver = AutoSaver::default();

        saver.schedule(recorder(&counter, 1));
        assert!(saver.cancel());
        assert!(!saver.is_pending());
        assert!(!saver.cancel());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_firing_is_a_no_op() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut saver = AutoSaver::new(Duration::from_millis(100));

        saver.schedule(recorder(&counter, 1));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!saver.cancel());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_save() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let mut saver = AutoSaver::default();
            saver.schedule(recorder(&counter, 1));
        }

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
