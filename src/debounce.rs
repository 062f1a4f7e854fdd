//! Cancel-and-restart delay for bursts of edits.
//!
//! Each [`Debouncer::schedule`] call aborts whatever job is still waiting and
//! starts a new one that runs after the quiet window. Only the last job of a
//! burst ever executes.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period used for keystroke-driven saves.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

pub struct Debouncer {
    window: Duration,
    waiting: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            waiting: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Run `job` once the window has passed with no further `schedule` calls.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        // The timer task hands the job to its own task, so aborting a timer
        // never interrupts a job that has already started.
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            tokio::spawn(job);
        });

        if let Some(previous) = self.lock().replace(timer) {
            previous.abort();
        }
    }

    /// Drop the waiting job, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.lock().take() {
            previous.abort();
        }
    }

    /// True while a scheduled job is still waiting out the window.
    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(|timer| !timer.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.waiting.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn burst_runs_only_last_job() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for i in 1..=5 {
            let runs = Arc::clone(&runs);
            let last = Arc::clone(&last);
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 5);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn cancel_drops_waiting_job() {
        let debouncer = Debouncer::new(Duration::from_millis(30));
        let runs = Arc::new(AtomicUsize::new(0));

        let r = Arc::clone(&runs);
        debouncer.schedule(async move {
            r.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn separated_calls_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let r = Arc::clone(&runs);
            debouncer.schedule(async move {
                r.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(120)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
